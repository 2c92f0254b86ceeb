use alloc::vec::Vec;
use core::cmp;

use crate::WindowRange;
use crate::fenwick::Fenwick;

/// Per-index height/offset bookkeeping for a windowed list.
///
/// Heights are two-phase: every index is seeded with a constant estimate, and replaced by the
/// real measurement once a node for that index has been rendered. Offsets are never stored;
/// `offset_top` is always the prefix sum over current heights, so an unmeasured index reads as
/// `index * estimate` until earlier indexes are measured, and becomes exact as measurements
/// arrive. The running total doubles as the scrollable track height.
#[derive(Clone, Debug)]
pub struct MetadataStore {
    estimate: u32,
    heights: Vec<u32>,
    measured: Vec<bool>,
    sums: Fenwick,
}

impl MetadataStore {
    /// Seeds `count` entries with the placeholder height.
    pub fn new(count: usize, estimate: u32) -> Self {
        let mut store = Self {
            estimate,
            heights: Vec::new(),
            measured: Vec::new(),
            sums: Fenwick::from_heights(&[]),
        };
        store.reset(count);
        store
    }

    /// Reseeds every entry with the estimate. Dataset replacement is a full reset; individual
    /// entries are never destroyed.
    pub fn reset(&mut self, count: usize) {
        wdebug!(count, estimate = self.estimate, "MetadataStore::reset");
        self.heights.clear();
        self.measured.clear();
        self.heights.resize(count, self.estimate);
        self.measured.resize(count, false);
        self.sums = Fenwick::from_heights(&self.heights);
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Stored height: the measurement if one was recorded, the estimate otherwise.
    pub fn height(&self, index: usize) -> u32 {
        self.heights.get(index).copied().unwrap_or(self.estimate)
    }

    /// Cumulative offset of the item's top edge: `Σ height(j)` for `j < index`.
    pub fn offset_top(&self, index: usize) -> u64 {
        self.sums.prefix_sum(index)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Records a measured height and returns the change against the previous value.
    ///
    /// The total track height shifts by the returned delta; callers are expected to push the new
    /// `total_height` to their render surface so the native scrollbar stays sized.
    pub fn set_height(&mut self, index: usize, height: u32) -> i64 {
        let Some(cur) = self.heights.get(index).copied() else {
            return 0;
        };
        self.measured[index] = true;
        if cur == height {
            return 0;
        }
        wtrace!(index, height, "MetadataStore::set_height");
        self.heights[index] = height;
        let delta = height as i64 - cur as i64;
        self.sums.add(index, delta);
        delta
    }

    /// Total content height under current knowledge (measured where known, estimated elsewhere).
    pub fn total_height(&self) -> u64 {
        self.sums.total()
    }

    /// The strictly-visible index range for a scroll position, no overscan.
    ///
    /// `start` is the first index whose cumulative height reaches `scroll_top`; `end` (exclusive)
    /// covers the first index whose cumulative height reaches the viewport bottom, clamped to the
    /// last item when the tail is shorter than the viewport. A `scroll_top` at or past the total
    /// content height yields an empty range.
    pub fn visible_range(&self, scroll_top: u64, viewport_height: u32) -> WindowRange {
        let count = self.len();
        if count == 0 || viewport_height == 0 {
            return WindowRange::EMPTY;
        }
        if scroll_top >= self.sums.total() {
            return WindowRange::EMPTY;
        }

        let start = self.first_index_covering(scroll_top).min(count - 1);
        let bottom = scroll_top.saturating_add(viewport_height as u64);
        let end = self.first_index_covering(bottom).min(count - 1);

        WindowRange {
            start,
            end: end + 1,
        }
    }

    /// The range to materialize: the visible range expanded by `overscan` on both sides, clamped
    /// to `[0, len]`.
    pub fn window(&self, scroll_top: u64, viewport_height: u32, overscan: usize) -> WindowRange {
        let visible = self.visible_range(scroll_top, viewport_height);
        if visible.is_empty() {
            return visible;
        }
        WindowRange {
            start: visible.start.saturating_sub(overscan),
            end: cmp::min(self.len(), visible.end.saturating_add(overscan)),
        }
    }

    /// First index `i` with `Σ height(j), j <= i` >= `target` (unclamped).
    fn first_index_covering(&self, target: u64) -> usize {
        if target == 0 {
            return 0;
        }
        // lower_bound counts the items whose inclusive prefix sum is <= target - 1; the next
        // index is the first one reaching target.
        self.sums.lower_bound(target - 1)
    }
}
