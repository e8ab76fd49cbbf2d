//! UiStore — pub/sub store for UI state shared between the app and the
//! progress strip.
//!
//! Two keys: the ordered segment-id list and the directionality flag. Built
//! on `tokio::sync::watch` so a fresh subscriber can read the current value
//! immediately (`Receiver::borrow`) and gets change notification after that.
//! The strip holds receivers handed to it at construction; nothing does
//! service discovery of its own.

use tokio::sync::watch;

/// Horizontal reading direction. Affects only the sign of rendered offsets,
/// never the underlying index math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        self == Self::RightToLeft
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LeftToRight => "LTR",
            Self::RightToLeft => "RTL",
        }
    }
}

pub struct UiStore {
    segments: watch::Sender<Vec<String>>,
    direction: watch::Sender<Direction>,
}

impl UiStore {
    pub fn new() -> Self {
        let (segments, _) = watch::channel(Vec::new());
        let (direction, _) = watch::channel(Direction::default());
        Self {
            segments,
            direction,
        }
    }

    pub fn set_segments(&self, ids: Vec<String>) {
        self.segments.send_replace(ids);
    }

    /// Current segment list (immediate read, no subscription).
    pub fn segments(&self) -> Vec<String> {
        self.segments.borrow().clone()
    }

    pub fn subscribe_segments(&self) -> watch::Receiver<Vec<String>> {
        self.segments.subscribe()
    }

    pub fn set_direction(&self, direction: Direction) {
        self.direction.send_replace(direction);
    }

    pub fn direction(&self) -> Direction {
        *self.direction.borrow()
    }

    /// Flip direction and return the new value.
    pub fn toggle_direction(&self) -> Direction {
        let next = self.direction().flipped();
        self.direction.send_replace(next);
        next
    }

    pub fn subscribe_direction(&self) -> watch::Receiver<Direction> {
        self.direction.subscribe()
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}
