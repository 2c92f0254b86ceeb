use alloc::vec::Vec;

use windowlist::{ShallowEq, shallow_eq_opt};

use crate::{FrameGate, RenderError};

/// The per-slot mutations a reconciliation pass can request.
///
/// Implemented by the embedding (the windowing controller implements it over a
/// [`crate::RenderSurface`] plus the metadata store). The reconciler itself never interprets
/// item fields; it only decides *which* of these to invoke for each slot.
pub trait SlotOps<I, N> {
    fn create(&mut self, item: &I) -> Result<N, RenderError>;
    fn patch(&mut self, item: &I, node: &mut N) -> Result<(), RenderError>;
    fn remove(&mut self, node: N);
}

/// Positionally reconciles an item array against an ordered set of materialized nodes.
///
/// Slots are matched by array position, not item identity: slot `i` of the previous pass is
/// compared (shallowly) against slot `i` of the next. Unchanged slots cost nothing; a slot with
/// no node yet is created; trailing nodes past the new length are removed. The materialized
/// nodes therefore always form a contiguous prefix, index-aligned with the last applied item
/// array.
#[derive(Debug)]
pub struct Reconciler<I, N> {
    items: Vec<I>,
    nodes: Vec<N>,
    pending: FrameGate<Vec<I>>,
}

impl<I, N> Default for Reconciler<I, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, N> Reconciler<I, N> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            nodes: Vec::new(),
            pending: FrameGate::new(),
        }
    }

    /// Number of currently materialized nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Defers an item array to the next frame boundary, replacing any array already pending.
    ///
    /// Repeated scheduling within the same pending frame is deduplicated: only the most recent
    /// array is applied when [`run_frame`](Self::run_frame) fires.
    pub fn schedule(&mut self, items: Vec<I>) {
        wtrace!(len = items.len(), replaced = self.pending.is_armed(), "Reconciler::schedule");
        self.pending.arm(items);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_armed()
    }

    /// Removes every materialized node and drops any pending item array, returning the
    /// reconciler to its freshly-constructed state.
    pub fn clear(&mut self, ops: &mut impl SlotOps<I, N>) {
        self.pending.take();
        self.items.clear();
        for node in self.nodes.drain(..) {
            ops.remove(node);
        }
    }
}

impl<I: ShallowEq, N> Reconciler<I, N> {
    /// Initial synchronous materialization: one node per item, in order.
    pub fn render(&mut self, items: Vec<I>, ops: &mut impl SlotOps<I, N>) -> Result<(), RenderError> {
        debug_assert!(self.nodes.is_empty(), "render on a non-empty reconciler");
        self.apply(items, ops)
    }

    /// Applies the pending item array, if one was scheduled.
    ///
    /// Returns `Ok(true)` when a pass ran. A scheduled pass always eventually runs; there is no
    /// cancellation.
    pub fn run_frame(&mut self, ops: &mut impl SlotOps<I, N>) -> Result<bool, RenderError> {
        match self.pending.take() {
            Some(items) => {
                self.apply(items, ops)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// One reconciliation pass. Per position in `new_items`:
    /// - node present, item shallow-equal to the previous one: untouched, no callback;
    /// - node present, item changed: patched in place;
    /// - no node (positions past the materialized prefix): created and appended.
    ///
    /// Nodes at positions >= `new_items.len()` are removed. Creates are staged before any
    /// existing node is patched: when one fails, the nodes staged so far are removed again and
    /// the previously materialized prefix is returned exactly as it was.
    fn apply(&mut self, new_items: Vec<I>, ops: &mut impl SlotOps<I, N>) -> Result<(), RenderError> {
        wdebug!(
            len = new_items.len(),
            materialized = self.nodes.len(),
            "Reconciler::apply"
        );
        let shared = core::cmp::min(self.nodes.len(), new_items.len());

        let mut created: Vec<N> = Vec::with_capacity(new_items.len().saturating_sub(shared));
        for item in &new_items[shared..] {
            match ops.create(item) {
                Ok(node) => created.push(node),
                Err(err) => {
                    for node in created {
                        ops.remove(node);
                    }
                    return Err(err);
                }
            }
        }

        for i in 0..shared {
            if !shallow_eq_opt(Some(&new_items[i]), self.items.get(i)) {
                if let Err(err) = ops.patch(&new_items[i], &mut self.nodes[i]) {
                    for node in created {
                        ops.remove(node);
                    }
                    return Err(err);
                }
            }
        }
        self.nodes.append(&mut created);

        if new_items.len() < self.nodes.len() {
            for node in self.nodes.drain(new_items.len()..) {
                ops.remove(node);
            }
        }

        self.items = new_items;
        Ok(())
    }
}
