//! Segmented progress strip core.
//!
//! Four cooperating pieces: the segment registry (identity + ordering), the
//! sliding window (which segments render at full size), the layout
//! calculator (width + offset per segment), and the progress state machine
//! (which fills change on an update, and which single non-active segment
//! animates). The host feeds serialized callbacks — segment-list changes,
//! progress ticks, debounced resizes, replay — and draws the resulting tree.
//!
//! Collaborators are injected: the pub/sub `UiStore` (segment list +
//! direction, current value readable immediately on subscribe) and the
//! two-phase `FrameScheduler` (reads now, writes batched until the next
//! `flush_frame`).

pub mod layout;
pub mod registry;
pub mod scheduler;
pub mod transition;
pub mod windowing;

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, error};

use deck_proto::config::StripConfig;
use deck_proto::store::{Direction, UiStore};

use layout::{compute_layout, LayoutParams, SegmentLayout};
use registry::SegmentRegistry;
use scheduler::FrameScheduler;
use transition::{SegmentFill, WritePolicy};
use windowing::{SegmentWindow, WindowParams};

#[derive(Debug, thiserror::Error)]
pub enum StripError {
    /// The operation referenced a segment id the registry doesn't know.
    /// Not recoverable — an integration bug in the caller.
    #[error("unknown segment: {0}")]
    UnknownSegment(String),
    /// Internal bookkeeping broke an invariant. Should never happen when
    /// callbacks are well-formed.
    #[error("strip invariant violated: {0}")]
    InvariantViolation(String),
}

/// One rendered segment: computed geometry plus fill state.
#[derive(Debug, Clone)]
pub struct SegmentNode {
    pub id: String,
    pub layout: SegmentLayout,
    pub fill: SegmentFill,
}

/// The root rendering handle — everything the renderer needs for one frame.
#[derive(Debug)]
pub struct SegmentTree {
    pub nodes: Vec<SegmentNode>,
    pub animations_enabled: bool,
}

impl Default for SegmentTree {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            animations_enabled: true,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveSegment {
    index: usize,
    progress: f64,
}

pub struct ProgressStrip {
    window_params: WindowParams,
    layout_params: LayoutParams,
    /// Progress-tick cadence — doubles as the transition duration.
    tick_cadence: Duration,
    registry: SegmentRegistry,
    window: SegmentWindow,
    tree: SegmentTree,
    scheduler: FrameScheduler<SegmentTree>,
    active: Option<ActiveSegment>,
    direction: Direction,
    total_width: f64,
    built: bool,
    segments_rx: watch::Receiver<Vec<String>>,
    direction_rx: watch::Receiver<Direction>,
}

impl ProgressStrip {
    pub fn new(cfg: &StripConfig, tick_cadence: Duration, store: &UiStore) -> Self {
        Self {
            window_params: WindowParams {
                size: cfg.window_size.max(1),
                edge_cap: cfg.edge_overflow_cap,
                step: cfg.recenter_step.max(1),
            },
            layout_params: LayoutParams {
                marker_width: cfg.marker_width,
                margin: cfg.margin,
            },
            tick_cadence,
            registry: SegmentRegistry::new(),
            window: SegmentWindow::default(),
            tree: SegmentTree::default(),
            scheduler: FrameScheduler::new(),
            active: None,
            direction: store.direction(),
            total_width: 0.0,
            built: false,
            segments_rx: store.subscribe_segments(),
            direction_rx: store.subscribe_direction(),
        }
    }

    /// Build the root handle from the store's current values. Idempotent:
    /// a second call returns the same tree without re-registering anything.
    pub fn build(&mut self) -> &SegmentTree {
        if !self.built {
            self.built = true;
            let ids = self.segments_rx.borrow_and_update().clone();
            self.direction = *self.direction_rx.borrow_and_update();
            self.install_segments(&ids);
        }
        &self.tree
    }

    /// Read access to the root handle.
    pub fn root(&self) -> &SegmentTree {
        &self.tree
    }

    /// Poll the injected store subscriptions. Both keys arrive serialized
    /// through the host's tick. Returns true when something changed.
    pub fn pump_store(&mut self) -> bool {
        let mut changed = false;
        if self.segments_rx.has_changed().unwrap_or(false) {
            let ids = self.segments_rx.borrow_and_update().clone();
            debug!("segment list replaced: {} segments", ids.len());
            self.install_segments(&ids);
            changed = true;
        }
        if self.direction_rx.has_changed().unwrap_or(false) {
            // Offsets are mirrored at draw time; no relayout needed.
            self.direction = *self.direction_rx.borrow_and_update();
            changed = true;
        }
        changed
    }

    /// Set progress for one segment.
    ///
    /// The first update after a (re)build places the window and repaints all
    /// fills without animation. After that, a change of active segment (or
    /// `update_all`) resynchronizes every other fill — complete before the
    /// active index, empty after it — and at most one non-active segment
    /// animates the transition:
    ///   (a) old and new progress both 1 (hand-off between played segments),
    ///   (b) index moved forward into a partially-played segment,
    ///   (c) index moved backward into a fully-played segment.
    pub fn update_progress(
        &mut self,
        id: &str,
        progress: f64,
        update_all: bool,
    ) -> Result<(), StripError> {
        let index = self.registry.index_of(id)?;
        let progress = progress.clamp(0.0, 1.0);
        let count = self.registry.len();
        let now = Instant::now();

        match self.active.clone() {
            None => {
                self.window = SegmentWindow::initial_for(index, count, &self.window_params);
                self.queue_fill(index, progress, WritePolicy::Instant, now);
                self.resync_other_fills(index, None, now);
                self.relayout(false);
            }
            Some(prev) => {
                self.queue_fill(index, progress, WritePolicy::Tracking, now);
                if prev.index != index || update_all {
                    let animate_prev = (prev.progress == 1.0 && progress == 1.0)
                        || (index > prev.index && progress != 1.0)
                        || (index < prev.index && progress == 1.0);
                    let animate_index =
                        (animate_prev && prev.index != index).then_some(prev.index);
                    self.resync_other_fills(index, animate_index, now);
                }
            }
        }

        self.active = Some(ActiveSegment { index, progress });

        if self.window.check_overflow(index, count, &self.window_params) {
            debug!(
                "window recentered: first_visible={} active={}",
                self.window.first_visible, index
            );
            self.relayout(true);
        }

        if let Err(e) = self.check_invariants(count) {
            // Abort the whole callback: drop anything half-queued.
            self.scheduler.clear();
            return Err(e);
        }
        Ok(())
    }

    /// Debounced-resize entry point: run the host's geometry read through
    /// the scheduler's read phase, then recompute width-derived layout.
    pub fn remeasure(&mut self, read: impl FnOnce() -> f64) {
        let width = self.scheduler.measure(read);
        self.on_resize(width);
    }

    /// Apply a freshly measured width and recompute width-derived layout.
    pub fn on_resize(&mut self, width: f64) {
        if (width - self.total_width).abs() < f64::EPSILON {
            return;
        }
        self.total_width = width.max(0.0);
        self.relayout(false);
    }

    /// The presentation restarted: window back to zero, full non-animated
    /// relayout. The registry — and the active state, which only
    /// `update_progress` mutates — are untouched.
    pub fn on_replay(&mut self) {
        self.window = SegmentWindow::default();
        self.relayout(false);
    }

    /// Apply queued mutations. The host calls this once per recomputation
    /// pass, right before drawing. Returns true if anything landed.
    pub fn flush_frame(&mut self) -> bool {
        self.scheduler.flush(&mut self.tree)
    }

    /// Advance in-flight fill transitions. Returns true while any segment
    /// is still animating, so the host keeps scheduling render ticks.
    pub fn advance_animations(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for node in &mut self.tree.nodes {
            animating |= node.fill.advance(now);
        }
        animating
    }

    // ── Render accessors ─────────────────────────────────────────────────────

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn segment_count(&self) -> usize {
        self.registry.len()
    }

    pub fn first_visible(&self) -> usize {
        self.window.first_visible
    }

    pub fn window_size(&self) -> usize {
        self.window_params.size
    }

    pub fn leading_overflow(&self) -> usize {
        self.window.leading_overflow(&self.window_params)
    }

    pub fn trailing_overflow(&self) -> usize {
        self.window
            .trailing_overflow(self.registry.len(), &self.window_params)
    }

    /// True when `index` renders as a collapsed overflow marker.
    pub fn is_marker(&self, index: usize) -> bool {
        !self.window.contains(index, &self.window_params)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    // ── Internals ────────────────────────────────────────────────────────────

    /// Replace the registered segment set. Pending writes target stale
    /// indices after this, so the queue is dropped with the old tree.
    fn install_segments(&mut self, ids: &[String]) {
        self.scheduler.clear();
        self.registry.reset();
        self.active = None;
        self.window = SegmentWindow::default();
        for id in ids {
            if let Err(e) = self.registry.add_segment(id) {
                error!("segment list rejected entry: {e}");
            }
        }
        self.tree.nodes = self
            .registry
            .ids()
            .iter()
            .map(|id| SegmentNode {
                id: id.clone(),
                layout: SegmentLayout::default(),
                fill: SegmentFill::new(),
            })
            .collect();
        self.relayout(false);
    }

    fn queue_fill(&mut self, index: usize, value: f64, policy: WritePolicy, now: Instant) {
        let cadence = self.tick_cadence;
        self.scheduler.mutate(Box::new(move |tree| {
            let enabled = tree.animations_enabled;
            if let Some(node) = tree.nodes.get_mut(index) {
                node.fill.set(value, policy, cadence, now, enabled);
            }
        }));
    }

    /// Rewrite every non-active fill around the new active segment:
    /// complete before it, empty after it. Only `animate_index` animates.
    fn resync_other_fills(&mut self, active_index: usize, animate_index: Option<usize>, now: Instant) {
        for i in 0..self.registry.len() {
            if i == active_index {
                continue;
            }
            let target = if i < active_index { 1.0 } else { 0.0 };
            let policy = if Some(i) == animate_index {
                WritePolicy::Snap
            } else {
                WritePolicy::Instant
            };
            self.queue_fill(i, target, policy, now);
        }
    }

    /// Recompute the full layout and queue it as one write. `animate=false`
    /// additionally snaps in-flight transitions for this pass and re-enables
    /// animations once the batch has been applied.
    fn relayout(&mut self, animate: bool) {
        let count = self.registry.len();
        let width = self.scheduler.measure(|| self.total_width);
        let layouts = compute_layout(
            count,
            &self.window,
            &self.window_params,
            &self.layout_params,
            width,
        );
        self.scheduler.mutate(Box::new(move |tree| {
            for (node, l) in tree.nodes.iter_mut().zip(layouts) {
                node.layout = l;
            }
        }));
        if !animate {
            let token = self.scheduler.mutate(Box::new(|tree| {
                tree.animations_enabled = false;
                for node in &mut tree.nodes {
                    node.fill.finish();
                }
            }));
            self.scheduler
                .after_flush(token, Box::new(|tree| tree.animations_enabled = true));
        }
    }

    fn check_invariants(&self, count: usize) -> Result<(), StripError> {
        let first = self.window.first_visible;
        if count > self.window_params.size {
            let max_first = count - self.window_params.size;
            if first > max_first {
                return Err(StripError::InvariantViolation(format!(
                    "first_visible {first} exceeds {max_first} for {count} segments"
                )));
            }
        } else if first != 0 {
            return Err(StripError::InvariantViolation(format!(
                "first_visible {first} with only {count} segments"
            )));
        }
        if self.tree.nodes.len() != count {
            return Err(StripError::InvariantViolation(format!(
                "tree holds {} nodes for {count} segments",
                self.tree.nodes.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_with(n: usize) -> (UiStore, ProgressStrip) {
        let store = UiStore::new();
        store.set_segments((0..n).map(|i| format!("s{i}")).collect());
        let cfg = StripConfig::default();
        let mut strip = ProgressStrip::new(&cfg, Duration::from_millis(200), &store);
        strip.build();
        strip.on_resize(100.0);
        strip.flush_frame();
        (store, strip)
    }

    #[test]
    fn test_first_update_snaps_window_per_display_budget() {
        let (_store, mut strip) = strip_with(50);
        strip.update_progress("s25", 0.5, false).unwrap();
        strip.flush_frame();
        assert_eq!(strip.first_visible(), 20);
        assert_eq!(strip.leading_overflow(), 3);
        assert_eq!(strip.trailing_overflow(), 3);
        // Everything before the active slide is full, everything after empty.
        assert_eq!(strip.root().nodes[24].fill.target(), 1.0);
        assert_eq!(strip.root().nodes[25].fill.target(), 0.5);
        assert_eq!(strip.root().nodes[26].fill.target(), 0.0);
        // First paint is non-animated.
        assert!(strip.root().nodes.iter().all(|n| !n.fill.is_animating()));
        assert!(strip.root().animations_enabled);
    }

    #[test]
    fn test_forward_handoff_animates_exactly_the_left_segment() {
        let (_store, mut strip) = strip_with(10);
        strip.update_progress("s0", 1.0, false).unwrap();
        strip.flush_frame();
        strip.update_progress("s1", 0.3, false).unwrap();
        strip.flush_frame();
        // Case (b): index advanced, new progress != 1 — s0 eases to full.
        let animating: Vec<usize> = strip
            .root()
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, n)| *i != 1 && n.fill.is_animating())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(animating, vec![0]);
        assert_eq!(strip.root().nodes[0].fill.target(), 1.0);
        // The active segment tracks its real-time value.
        assert_eq!(strip.root().nodes[1].fill.target(), 0.3);
    }

    #[test]
    fn test_full_handoff_between_played_segments_animates() {
        let (_store, mut strip) = strip_with(10);
        strip.update_progress("s3", 1.0, false).unwrap();
        strip.flush_frame();
        strip.update_progress("s4", 1.0, false).unwrap();
        strip.flush_frame();
        // Case (a): both old and new progress are 1.
        assert!(strip.root().nodes[3].fill.is_animating());
    }

    #[test]
    fn test_backward_into_played_segment_animates() {
        let (_store, mut strip) = strip_with(10);
        strip.update_progress("s5", 0.4, false).unwrap();
        strip.flush_frame();
        strip.update_progress("s4", 1.0, false).unwrap();
        strip.flush_frame();
        // Case (c): index decreased, new progress is 1 — s5 snaps back to 0.
        assert!(strip.root().nodes[5].fill.is_animating());
        assert_eq!(strip.root().nodes[5].fill.target(), 0.0);
    }

    #[test]
    fn test_backward_into_partial_segment_does_not_animate() {
        let (_store, mut strip) = strip_with(10);
        strip.update_progress("s5", 0.4, false).unwrap();
        strip.flush_frame();
        strip.update_progress("s4", 0.2, false).unwrap();
        strip.flush_frame();
        let non_active_animating = strip
            .root()
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, n)| *i != 4 && n.fill.is_animating())
            .count();
        assert_eq!(non_active_animating, 0);
    }

    #[test]
    fn test_same_segment_tick_touches_nothing_else() {
        let (_store, mut strip) = strip_with(10);
        strip.update_progress("s2", 0.2, false).unwrap();
        strip.flush_frame();
        strip.update_progress("s2", 0.4, false).unwrap();
        strip.flush_frame();
        assert_eq!(strip.root().nodes[2].fill.target(), 0.4);
        let others_animating = strip
            .root()
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, n)| *i != 2 && n.fill.is_animating())
            .count();
        assert_eq!(others_animating, 0);
    }

    #[test]
    fn test_unknown_segment_is_fatal_for_the_callback() {
        let (_store, mut strip) = strip_with(5);
        assert!(matches!(
            strip.update_progress("nope", 0.5, false),
            Err(StripError::UnknownSegment(_))
        ));
    }

    #[test]
    fn test_build_is_idempotent() {
        let store = UiStore::new();
        store.set_segments(vec!["a".into(), "b".into()]);
        let cfg = StripConfig::default();
        let mut strip = ProgressStrip::new(&cfg, Duration::from_millis(200), &store);
        assert_eq!(strip.build().nodes.len(), 2);
        assert_eq!(strip.build().nodes.len(), 2);
        assert_eq!(strip.segment_count(), 2);
    }

    #[test]
    fn test_replay_rewinds_window_keeps_registry() {
        let (_store, mut strip) = strip_with(50);
        strip.update_progress("s40", 0.9, false).unwrap();
        strip.flush_frame();
        assert_eq!(strip.first_visible(), 30);
        strip.on_replay();
        strip.flush_frame();
        assert_eq!(strip.first_visible(), 0);
        assert_eq!(strip.segment_count(), 50);
        // Next update resynchronizes from the top without animation trouble.
        strip.update_progress("s0", 0.0, false).unwrap();
        strip.flush_frame();
        assert_eq!(strip.root().nodes[40].fill.target(), 0.0);
    }

    #[test]
    fn test_segment_list_change_rebuilds_tree() {
        let (store, mut strip) = strip_with(10);
        strip.update_progress("s3", 0.5, false).unwrap();
        strip.flush_frame();
        store.set_segments(vec!["x".into(), "y".into()]);
        assert!(strip.pump_store());
        strip.flush_frame();
        assert_eq!(strip.segment_count(), 2);
        assert!(matches!(
            strip.update_progress("s3", 0.5, false),
            Err(StripError::UnknownSegment(_))
        ));
        strip.update_progress("x", 0.1, false).unwrap();
        strip.flush_frame();
        assert_eq!(strip.root().nodes[0].fill.target(), 0.1);
    }
}
