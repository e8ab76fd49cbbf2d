//! AppState — shared read-only data passed to all components during
//! render/event handling.
//!
//! Components read this but never mutate it. The App event-loop is the only
//! thing that writes to AppState.

use deck_proto::deck::{Deck, Slide};
use deck_proto::store::Direction;

use crate::widgets::status_bar::InputMode;

/// Snapshot of the playback engine, refreshed by the App after every
/// dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackInfo {
    pub slide_index: usize,
    pub position_secs: f64,
    pub playing: bool,
    /// True once the last slide completed and autoplay stopped.
    pub finished: bool,
}

pub struct AppState {
    pub deck: Deck,
    pub playback: PlaybackInfo,
    pub direction: Direction,
    pub input_mode: InputMode,
    /// Last status-line message.
    pub last_log: Option<String>,
}

impl AppState {
    pub fn new(deck: Deck, direction: Direction) -> Self {
        Self {
            deck,
            playback: PlaybackInfo::default(),
            direction,
            input_mode: InputMode::Normal,
            last_log: None,
        }
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.deck.slides.get(self.playback.slide_index)
    }

    /// Fractional progress of the active slide, in [0,1].
    pub fn progress_fraction(&self) -> f64 {
        match self.current_slide() {
            Some(s) if s.duration_secs > 0.0 => {
                (self.playback.position_secs / s.duration_secs).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}
