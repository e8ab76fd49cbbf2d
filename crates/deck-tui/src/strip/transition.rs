//! Per-segment fill state with animated transitions.
//!
//! Three write policies:
//! - `Instant` — resync writes; the fill jumps.
//! - `Tracking` — the active segment's real-time value; linear, with the
//!   progress-tick cadence as duration, so the fill tracks playback instead
//!   of lagging or outrunning it.
//! - `Snap` — the one non-active segment flagged to animate an update;
//!   eased when the target is exactly 0 or 1, linear otherwise.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    Instant,
    Tracking,
    Snap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Curve {
    Linear,
    EaseOutCubic,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
    curve: Curve,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentFill {
    target: f64,
    shown: f64,
    transition: Option<Transition>,
}

impl SegmentFill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// The value the renderer should draw this frame.
    pub fn shown(&self) -> f64 {
        self.shown
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn set(
        &mut self,
        value: f64,
        policy: WritePolicy,
        cadence: Duration,
        now: Instant,
        animations_enabled: bool,
    ) {
        let value = value.clamp(0.0, 1.0);
        self.target = value;
        if !animations_enabled || policy == WritePolicy::Instant || cadence.is_zero() {
            self.shown = value;
            self.transition = None;
            return;
        }
        let curve = match policy {
            WritePolicy::Snap if value == 0.0 || value == 1.0 => Curve::EaseOutCubic,
            _ => Curve::Linear,
        };
        self.transition = Some(Transition {
            from: self.shown,
            to: value,
            started: now,
            duration: cadence,
            curve,
        });
    }

    /// Snap any in-flight transition to its end value.
    pub fn finish(&mut self) {
        self.shown = self.target;
        self.transition = None;
    }

    /// Advance toward the target. Returns true while still animating.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(t) = self.transition else {
            return false;
        };
        let elapsed = now.saturating_duration_since(t.started).as_secs_f64();
        let raw = (elapsed / t.duration.as_secs_f64()).clamp(0.0, 1.0);
        let eased = match t.curve {
            Curve::Linear => raw,
            Curve::EaseOutCubic => 1.0 - (1.0 - raw).powi(3),
        };
        self.shown = t.from + (t.to - t.from) * eased;
        if raw >= 1.0 {
            self.shown = t.to;
            self.transition = None;
            false
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CADENCE: Duration = Duration::from_millis(200);

    #[test]
    fn test_instant_write_jumps() {
        let mut fill = SegmentFill::new();
        let now = Instant::now();
        fill.set(0.7, WritePolicy::Instant, CADENCE, now, true);
        assert_eq!(fill.shown(), 0.7);
        assert!(!fill.is_animating());
    }

    #[test]
    fn test_disabled_animations_force_instant() {
        let mut fill = SegmentFill::new();
        let now = Instant::now();
        fill.set(1.0, WritePolicy::Snap, CADENCE, now, false);
        assert_eq!(fill.shown(), 1.0);
        assert!(!fill.is_animating());
    }

    #[test]
    fn test_tracking_write_ramps_linearly() {
        let mut fill = SegmentFill::new();
        let start = Instant::now();
        fill.set(1.0, WritePolicy::Tracking, CADENCE, start, true);
        assert!(fill.is_animating());
        assert!(fill.advance(start + CADENCE / 2));
        assert!((fill.shown() - 0.5).abs() < 1e-9);
        assert!(!fill.advance(start + CADENCE));
        assert_eq!(fill.shown(), 1.0);
    }

    #[test]
    fn test_snap_to_boundary_eases() {
        let mut fill = SegmentFill::new();
        let start = Instant::now();
        fill.set(0.5, WritePolicy::Instant, CADENCE, start, true);
        fill.set(1.0, WritePolicy::Snap, CADENCE, start, true);
        fill.advance(start + CADENCE / 2);
        // Ease-out front-loads the motion: past the linear midpoint.
        let linear_mid = 0.75;
        assert!(fill.shown() > linear_mid);
        fill.advance(start + CADENCE);
        assert_eq!(fill.shown(), 1.0);
    }

    #[test]
    fn test_snap_to_interior_value_is_linear() {
        let mut fill = SegmentFill::new();
        let start = Instant::now();
        fill.set(0.6, WritePolicy::Snap, CADENCE, start, true);
        fill.advance(start + CADENCE / 2);
        assert!((fill.shown() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_finish_lands_on_target() {
        let mut fill = SegmentFill::new();
        let start = Instant::now();
        fill.set(0.9, WritePolicy::Tracking, CADENCE, start, true);
        fill.finish();
        assert_eq!(fill.shown(), 0.9);
        assert!(!fill.is_animating());
    }
}
