use crate::*;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::sim::{SimNode, SimSurface};

// --- Reconciler ----------------------------------------------------------

#[derive(Default)]
struct CountingOps {
    creates: usize,
    patches: usize,
    removes: usize,
    /// When set, the nth create call (0-based, counted per ops lifetime) fails.
    fail_create_at: Option<usize>,
    create_calls: usize,
}

impl SlotOps<u64, u64> for CountingOps {
    fn create(&mut self, item: &u64) -> Result<u64, RenderError> {
        let call = self.create_calls;
        self.create_calls += 1;
        if self.fail_create_at == Some(call) {
            return Err(RenderError::Create {
                index: *item as usize,
                source: SurfaceError::new("simulated create failure"),
            });
        }
        self.creates += 1;
        Ok(*item)
    }

    fn patch(&mut self, item: &u64, node: &mut u64) -> Result<(), RenderError> {
        self.patches += 1;
        *node = *item;
        Ok(())
    }

    fn remove(&mut self, _node: u64) {
        self.removes += 1;
    }
}

#[test]
fn render_creates_one_node_per_item_in_order() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![10u64, 11, 12], &mut ops).unwrap();
    assert_eq!(ops.creates, 3);
    assert_eq!(ops.patches, 0);
    assert_eq!(list.len(), 3);
}

#[test]
fn unchanged_items_invoke_no_callbacks() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2, 3], &mut ops).unwrap();

    list.schedule(vec![1, 2, 3]);
    assert!(list.run_frame(&mut ops).unwrap());
    assert_eq!(ops.creates, 3);
    assert_eq!(ops.patches, 0);
    assert_eq!(ops.removes, 0);
}

#[test]
fn single_changed_slot_patches_only_that_slot() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2, 3], &mut ops).unwrap();

    list.schedule(vec![1, 9, 3]);
    list.run_frame(&mut ops).unwrap();
    assert_eq!(ops.patches, 1);
    assert_eq!(ops.creates, 3);
    assert_eq!(ops.removes, 0);
}

#[test]
fn missing_patch_targets_are_created_silently() {
    // Positions past the materialized prefix have no node to patch; they are created, never
    // reported as an error.
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2], &mut ops).unwrap();

    list.schedule(vec![1, 2, 3, 4]);
    list.run_frame(&mut ops).unwrap();
    assert_eq!(ops.creates, 4);
    assert_eq!(ops.patches, 0);
    assert_eq!(list.len(), 4);
}

#[test]
fn shrink_removes_exactly_the_trailing_nodes() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2, 3, 4, 5], &mut ops).unwrap();

    list.schedule(vec![1, 2]);
    list.run_frame(&mut ops).unwrap();
    assert_eq!(ops.removes, 3);
    assert_eq!(ops.patches, 0);
    assert_eq!(list.len(), 2);
}

#[test]
fn empty_items_remove_everything() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2, 3], &mut ops).unwrap();

    list.schedule(Vec::new());
    list.run_frame(&mut ops).unwrap();
    assert_eq!(ops.removes, 3);
    assert!(list.is_empty());
}

#[test]
fn schedule_replaces_pending_frame() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2], &mut ops).unwrap();

    // The first scheduled array would patch both slots; the second supersedes it before the
    // frame fires.
    list.schedule(vec![8, 9]);
    list.schedule(vec![1, 2]);
    assert!(list.run_frame(&mut ops).unwrap());
    assert_eq!(ops.patches, 0);

    assert!(!list.has_pending());
    assert!(!list.run_frame(&mut ops).unwrap());
}

#[test]
fn failed_create_rolls_back_nodes_from_the_pass() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2], &mut ops).unwrap();

    // Creates for positions 2 and 3; the second one (4th call overall) fails.
    ops.fail_create_at = Some(3);
    list.schedule(vec![1, 2, 3, 4]);
    assert!(list.run_frame(&mut ops).is_err());

    // The staged node for position 2 was removed; the pre-pass state survives.
    assert_eq!(ops.removes, 1);
    assert_eq!(list.len(), 2);

    // Replaying the previous items is a no-op: nothing was half-applied.
    ops.fail_create_at = None;
    list.schedule(vec![1, 2]);
    list.run_frame(&mut ops).unwrap();
    assert_eq!(ops.patches, 0);
}

#[test]
fn failed_create_patches_no_existing_nodes() {
    let mut list = Reconciler::new();
    let mut ops = CountingOps::default();
    list.render(vec![1u64, 2], &mut ops).unwrap();

    // Both materialized slots change AND the window grows; the one create (3rd call
    // overall) fails. The pass must not have touched the existing nodes.
    ops.fail_create_at = Some(2);
    list.schedule(vec![9, 8, 3]);
    assert!(list.run_frame(&mut ops).is_err());
    assert_eq!(ops.patches, 0);
    assert_eq!(list.len(), 2);

    // The pre-failure items survive too: reconciling them again changes nothing.
    ops.fail_create_at = None;
    list.schedule(vec![1, 2]);
    list.run_frame(&mut ops).unwrap();
    assert_eq!(ops.patches, 0);
}

// --- Frame utilities ------------------------------------------------------

#[test]
fn frame_gate_keeps_only_the_latest_payload() {
    let mut gate = FrameGate::new();
    assert!(!gate.is_armed());
    gate.arm(100u64);
    gate.arm(300);
    assert_eq!(gate.take(), Some(300));
    assert_eq!(gate.take(), None);
}

#[test]
fn throttle_accepts_one_call_per_interval() {
    let mut t = Throttle::new(150);
    assert!(t.ready(0));
    assert!(!t.ready(100));
    assert!(!t.ready(149));
    assert!(t.ready(150));
    assert!(!t.ready(200));
    t.reset();
    assert!(t.ready(200));
}

// --- VirtualList + SimSurface --------------------------------------------

fn counting_options() -> (VirtualListOptions<u32, SimNode>, Arc<AtomicUsize>) {
    let patches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&patches);
    let options = VirtualListOptions::new(
        |item: &u32| format!("<row>{item}</row>"),
        move |item: &u32, node: &mut SimNode| {
            counter.fetch_add(1, Ordering::Relaxed);
            node.markup = format!("<row>{item}</row>");
        },
    );
    (options, patches)
}

fn feed(count: u32) -> Vec<u32> {
    (0..count).collect()
}

#[test]
fn mount_materializes_the_bootstrap_window() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(100);

    vl.mount(&mut s).unwrap();
    assert_eq!(vl.materialized(), 6);
    assert_eq!(s.created(), 6);

    // Estimate-sized track (10 * 250) corrected by six measurements of 100.
    assert_eq!(s.track_height(), 2500 - 6 * 150);

    // Each node lands at the prefix sum of the measured heights before it.
    assert_eq!(s.offset_log(), &[0, 100, 200, 300, 400, 500]);
    assert!(vl.metadata().is_measured(5));
    assert!(!vl.metadata().is_measured(6));
}

#[test]
fn remount_starts_over_without_duplicating_nodes() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(100);

    vl.mount(&mut s).unwrap();
    vl.on_viewport_resize(500);
    vl.on_scroll(300);

    // The second mount removes the first mount's nodes and drops the pending scroll.
    vl.mount(&mut s).unwrap();
    assert_eq!(vl.materialized(), 6);
    assert_eq!(s.removed(), 6);
    assert_eq!(s.live(), 6);
    assert!(!vl.tick(&mut s).unwrap());
}

#[test]
fn short_dataset_bootstraps_fewer_nodes() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(3), options);
    let mut s = SimSurface::with_fixed_height(100);
    vl.mount(&mut s).unwrap();
    assert_eq!(vl.materialized(), 3);
}

#[test]
fn empty_dataset_is_valid() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(Vec::new(), options);
    let mut s = SimSurface::with_fixed_height(100);
    vl.mount(&mut s).unwrap();
    assert_eq!(vl.materialized(), 0);
    assert_eq!(s.track_height(), 0);

    vl.on_viewport_resize(500);
    vl.on_scroll(100);
    vl.tick(&mut s).unwrap();
    assert_eq!(vl.materialized(), 0);
}

#[test]
fn scroll_burst_coalesces_into_one_pass() {
    let (options, patches) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(250);

    vl.mount(&mut s).unwrap();
    vl.on_viewport_resize(500);
    vl.on_scroll(100);
    vl.on_scroll(200);
    vl.on_scroll(300);

    // One tick, one recomputation, at the latest position.
    assert!(vl.tick(&mut s).unwrap());
    assert!(!vl.tick(&mut s).unwrap());
    assert_eq!(vl.scroll_top(), 300);

    // Heights match the estimate, so the bootstrap snapshots are still accurate: the pass
    // found every slot unchanged.
    assert_eq!(patches.load(Ordering::Relaxed), 0);
    assert_eq!(s.created(), 6);
}

#[test]
fn steady_state_scrolling_costs_nothing() {
    let (options, patches) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(250);

    vl.mount(&mut s).unwrap();
    vl.on_viewport_resize(500);
    vl.on_scroll(300);
    vl.tick(&mut s).unwrap();

    let created = s.created();
    vl.on_scroll(300);
    assert!(vl.tick(&mut s).unwrap());
    assert_eq!(patches.load(Ordering::Relaxed), 0);
    assert_eq!(s.created(), created);
}

#[test]
fn window_shrink_removes_trailing_nodes() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(250);

    vl.mount(&mut s).unwrap();
    assert_eq!(vl.materialized(), 6);

    // At 250px rows and a 500px viewport, the window from the top is [0, 4): two visible rows
    // plus overscan. The two trailing bootstrap nodes go away.
    vl.on_viewport_resize(500);
    vl.on_scroll(0);
    vl.tick(&mut s).unwrap();
    assert_eq!(vl.materialized(), 4);
    assert_eq!(s.removed(), 2);
}

#[test]
fn measured_heights_shift_later_windows_and_offsets() {
    let (options, patches) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(100);

    vl.mount(&mut s).unwrap();
    vl.on_viewport_resize(500);
    vl.on_scroll(300);
    vl.tick(&mut s).unwrap();

    // With the first six rows measured at 100px and the rest estimated at 250px, scrolling to
    // 300 materializes [0, 9): three new nodes, and the six bootstrap slots are patched
    // because their offset/height snapshots moved from estimates to measurements.
    assert_eq!(vl.materialized(), 9);
    assert_eq!(s.created(), 9);
    assert_eq!(patches.load(Ordering::Relaxed), 6);

    // The freshly created rows were measured and positioned at exact prefix sums.
    assert_eq!(vl.metadata().offset_top(8), 800);
    assert!(vl.metadata().is_measured(8));
}

#[test]
fn scroll_past_the_end_renders_nothing_and_recovers() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(250);

    vl.mount(&mut s).unwrap();
    vl.on_viewport_resize(500);
    vl.on_scroll(1_000_000);
    assert!(vl.tick(&mut s).unwrap());
    assert_eq!(vl.materialized(), 0);
    assert_eq!(s.live(), 0);

    vl.on_scroll(0);
    vl.tick(&mut s).unwrap();
    assert_eq!(vl.materialized(), 4);
}

#[test]
fn set_items_is_a_full_reset() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(100);

    vl.mount(&mut s).unwrap();
    assert!(vl.metadata().is_measured(0));

    vl.set_items(feed(4).iter().map(|i| i + 100).collect());
    assert_eq!(vl.metadata().len(), 4);
    assert!(!vl.metadata().is_measured(0));

    vl.on_viewport_resize(500);
    vl.tick(&mut s).unwrap();
    assert_eq!(vl.materialized(), 4);
    // All four re-measured at 100px; the final track reflects the new dataset only.
    assert_eq!(s.track_height(), 400);
}

#[test]
fn viewport_resize_triggers_a_recompute() {
    let (options, patches) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);
    let mut s = SimSurface::with_fixed_height(250);

    vl.mount(&mut s).unwrap();
    vl.on_viewport_resize(1000);
    assert!(vl.tick(&mut s).unwrap());
    assert_eq!(vl.materialized(), 6);
    assert_eq!(patches.load(Ordering::Relaxed), 0);

    // Same height again: nothing pending.
    vl.on_viewport_resize(1000);
    assert!(!vl.tick(&mut s).unwrap());
}

#[test]
fn unmeasurable_node_fails_the_pass_and_preserves_state() {
    let (options, _) = counting_options();
    let mut vl = VirtualList::<u32, SimSurface>::new(feed(10), options);

    // The third measurement fails.
    let mut calls = 0u32;
    let mut s = SimSurface::with_measure(move |_| {
        calls += 1;
        (calls <= 2).then_some(100)
    });

    let err = vl.mount(&mut s).unwrap_err();
    match err {
        RenderError::Unmeasurable { index, .. } => assert_eq!(index, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    // Every node created during the failed pass was removed again.
    assert_eq!(vl.materialized(), 0);
    assert_eq!(s.live(), 0);
}

#[test]
fn render_errors_name_the_failing_index() {
    let err = RenderError::Unmeasurable {
        index: 7,
        source: SurfaceError::new("layout unavailable for node"),
    };
    assert_eq!(
        format!("{err}"),
        "node for index 7 could not be measured: layout unavailable for node"
    );
}
