use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp;

use windowlist::{MetadataStore, ShallowEq, WindowItem, WindowRange};

use crate::{FrameGate, Reconciler, RenderError, RenderSurface, SlotOps};

/// Placeholder row height used until an index is rendered and measured.
pub const DEFAULT_ESTIMATE_HEIGHT: u32 = 250;
/// Extra slots materialized beyond the strictly-visible range, on each side.
pub const DEFAULT_OVERSCAN: usize = 2;
/// Size of the fixed initial window rendered at mount, before the container height is known.
pub const DEFAULT_BOOTSTRAP_LEN: usize = 6;

/// Configuration for [`VirtualList`].
///
/// Item callbacks are stored in `Arc`s so options stay cheap to clone. The controller never
/// interprets item fields: `render_item` produces opaque markup for a fresh node, and
/// `update_item` patches whichever fields of an existing node it recognizes.
pub struct VirtualListOptions<T, N> {
    pub estimate_height: u32,
    pub overscan: usize,
    pub bootstrap_len: usize,
    pub render_item: Arc<dyn Fn(&T) -> String + Send + Sync>,
    pub update_item: Arc<dyn Fn(&T, &mut N) + Send + Sync>,
}

impl<T, N> VirtualListOptions<T, N> {
    pub fn new(
        render_item: impl Fn(&T) -> String + Send + Sync + 'static,
        update_item: impl Fn(&T, &mut N) + Send + Sync + 'static,
    ) -> Self {
        Self {
            estimate_height: DEFAULT_ESTIMATE_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            bootstrap_len: DEFAULT_BOOTSTRAP_LEN,
            render_item: Arc::new(render_item),
            update_item: Arc::new(update_item),
        }
    }

    pub fn with_estimate_height(mut self, estimate_height: u32) -> Self {
        self.estimate_height = estimate_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_bootstrap_len(mut self, bootstrap_len: usize) -> Self {
        self.bootstrap_len = bootstrap_len;
        self
    }
}

impl<T, N> Clone for VirtualListOptions<T, N> {
    fn clone(&self) -> Self {
        Self {
            estimate_height: self.estimate_height,
            overscan: self.overscan,
            bootstrap_len: self.bootstrap_len,
            render_item: Arc::clone(&self.render_item),
            update_item: Arc::clone(&self.update_item),
        }
    }
}

impl<T, N> core::fmt::Debug for VirtualListOptions<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("estimate_height", &self.estimate_height)
            .field("overscan", &self.overscan)
            .field("bootstrap_len", &self.bootstrap_len)
            .finish_non_exhaustive()
    }
}

/// The windowing controller: owns the full dataset, its metadata store, and one [`Reconciler`]
/// scoped to the currently-materialized window.
///
/// The cooperative model is adapter-driven: the embedding forwards scroll positions via
/// [`on_scroll`](Self::on_scroll) and container heights via
/// [`on_viewport_resize`](Self::on_viewport_resize), then calls [`tick`](Self::tick) at each
/// frame boundary. Scroll bursts between ticks coalesce into a single recomputation of the
/// window (latest position wins).
pub struct VirtualList<T, S: RenderSurface> {
    options: VirtualListOptions<T, S::Node>,
    data: Vec<T>,
    meta: MetadataStore,
    list: Reconciler<WindowItem<T>, S::Node>,
    viewport_height: u32,
    scroll_top: u64,
    pending: FrameGate<u64>,
    mounted: bool,
}

impl<T: Clone + ShallowEq, S: RenderSurface> VirtualList<T, S> {
    pub fn new(data: Vec<T>, options: VirtualListOptions<T, S::Node>) -> Self {
        let meta = MetadataStore::new(data.len(), options.estimate_height);
        Self {
            options,
            data,
            meta,
            list: Reconciler::new(),
            viewport_height: 0,
            scroll_top: 0,
            pending: FrameGate::new(),
            mounted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.data
    }

    /// Number of currently materialized nodes.
    pub fn materialized(&self) -> usize {
        self.list.len()
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.meta
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    /// Initial mount: seeds estimates for the whole dataset, sizes the track to
    /// `estimate * count` as a first approximation, and materializes the bootstrap window.
    ///
    /// The bootstrap window is a fixed small range, not computed from the container height:
    /// at mount time the container has not been measured yet. Each created node is measured
    /// immediately and its real height committed, so the track is corrected as a side effect.
    ///
    /// Mounting again starts over: nodes from the previous mount are removed, pending work is
    /// dropped, and the bootstrap window is materialized from scratch.
    pub fn mount(&mut self, surface: &mut S) -> Result<(), RenderError> {
        let count = self.data.len();
        wdebug!(count, bootstrap = self.options.bootstrap_len, "VirtualList::mount");
        self.meta.reset(count);
        self.pending.take();
        surface.set_track_height(self.options.estimate_height as u64 * count as u64);

        let end = cmp::min(self.options.bootstrap_len, count);
        let items = self.window_items(WindowRange { start: 0, end });

        let Self {
            meta,
            list,
            options,
            ..
        } = &mut *self;
        let mut pass = SlotPass {
            surface,
            meta,
            render_item: &options.render_item,
            update_item: &options.update_item,
        };
        list.clear(&mut pass);
        list.render(items, &mut pass)?;
        self.mounted = true;
        Ok(())
    }

    /// Records a scroll position, replacing any position already pending for the next tick.
    pub fn on_scroll(&mut self, scroll_top: u64) {
        wtrace!(scroll_top, "VirtualList::on_scroll");
        self.scroll_top = scroll_top;
        self.pending.arm(scroll_top);
    }

    /// Records the scroll container's measured height (initially, and on any later resize).
    pub fn on_viewport_resize(&mut self, height: u32) {
        if self.viewport_height == height {
            return;
        }
        wtrace!(height, "VirtualList::on_viewport_resize");
        self.viewport_height = height;
        self.pending.arm(self.scroll_top);
    }

    /// Replaces the dataset. Metadata is fully reset (estimates reseeded for the new length);
    /// the next tick reconciles the window against the new items.
    pub fn set_items(&mut self, data: Vec<T>) {
        self.data = data;
        self.meta.reset(self.data.len());
        self.pending.arm(self.scroll_top);
    }

    /// The frame boundary: runs at most one window recomputation + reconciliation pass.
    ///
    /// Returns `Ok(true)` when a pass ran. A scroll position past the total content height
    /// yields an empty window and removes every materialized node rather than failing.
    pub fn tick(&mut self, surface: &mut S) -> Result<bool, RenderError> {
        if !self.mounted {
            return Ok(false);
        }
        let Some(scroll_top) = self.pending.take() else {
            return Ok(false);
        };

        let range = self
            .meta
            .window(scroll_top, self.viewport_height, self.options.overscan);
        wdebug!(
            scroll_top,
            start = range.start,
            end = range.end,
            "VirtualList::tick"
        );
        let items = self.window_items(range);
        self.list.schedule(items);

        let Self {
            meta,
            list,
            options,
            ..
        } = &mut *self;
        let mut pass = SlotPass {
            surface,
            meta,
            render_item: &options.render_item,
            update_item: &options.update_item,
        };
        list.run_frame(&mut pass)?;

        // Keeps the track in sync after dataset resets, when an empty window commits nothing.
        surface.set_track_height(self.meta.total_height());
        Ok(true)
    }

    /// Slices the dataset into reconciler items, snapshotting current metadata values
    /// (estimated or measured) for each index.
    fn window_items(&self, range: WindowRange) -> Vec<WindowItem<T>> {
        let end = cmp::min(range.end, self.data.len());
        if range.start >= end {
            return Vec::new();
        }
        self.data[range.start..end]
            .iter()
            .enumerate()
            .map(|(k, item)| {
                let index = range.start + k;
                WindowItem {
                    item: item.clone(),
                    index,
                    offset_top: self.meta.offset_top(index),
                    height: self.meta.height(index),
                }
            })
            .collect()
    }
}

/// One reconciliation pass's view of the world: measure-and-commit on every create and patch.
struct SlotPass<'a, T, S: RenderSurface> {
    surface: &'a mut S,
    meta: &'a mut MetadataStore,
    render_item: &'a Arc<dyn Fn(&T) -> String + Send + Sync>,
    update_item: &'a Arc<dyn Fn(&T, &mut S::Node) + Send + Sync>,
}

impl<T, S: RenderSurface> SlotPass<'_, T, S> {
    /// Post-processing shared by create and patch: measure the node's real height, commit it
    /// (resizing the track immediately), then position the node at its prefix-sum offset.
    fn commit(&mut self, index: usize, node: &mut S::Node) -> Result<(), RenderError> {
        let height = self
            .surface
            .measure_height(node)
            .map_err(|source| RenderError::Unmeasurable { index, source })?;
        self.meta.set_height(index, height);
        self.surface.set_track_height(self.meta.total_height());

        let offset_top = self.meta.offset_top(index);
        self.surface.apply_offset(node, offset_top);
        Ok(())
    }
}

impl<T, S: RenderSurface> SlotOps<WindowItem<T>, S::Node> for SlotPass<'_, T, S> {
    fn create(&mut self, item: &WindowItem<T>) -> Result<S::Node, RenderError> {
        let markup = (self.render_item)(&item.item);
        let mut node = self
            .surface
            .create_node(&markup)
            .map_err(|source| RenderError::Create {
                index: item.index,
                source,
            })?;
        if let Err(err) = self.commit(item.index, &mut node) {
            self.surface.remove_node(node);
            return Err(err);
        }
        Ok(node)
    }

    fn patch(&mut self, item: &WindowItem<T>, node: &mut S::Node) -> Result<(), RenderError> {
        (self.update_item)(&item.item, node);
        self.commit(item.index, node)
    }

    fn remove(&mut self, node: S::Node) {
        self.surface.remove_node(node);
    }
}
