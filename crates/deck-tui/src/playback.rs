//! Playback engine — tick-driven advance of the active slide.
//!
//! The engine owns the playback cursor (slide index + position) and turns
//! every state change into `ProgressEvent`s for the strip: a tick inside a
//! slide yields one real-time update; completing a slide yields the closing
//! `1.0` update followed by the next slide's opening `0.0`. Jumps (goto,
//! random) request a full fill resync via `update_all`.

use deck_proto::deck::Deck;
use rand::Rng;

use crate::app_state::PlaybackInfo;

/// One progress update for the strip.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub id: String,
    pub value: f64,
    pub update_all: bool,
}

impl ProgressEvent {
    fn step(id: &str, value: f64) -> Self {
        Self {
            id: id.to_string(),
            value,
            update_all: false,
        }
    }

    fn jump(id: &str, value: f64) -> Self {
        Self {
            id: id.to_string(),
            value,
            update_all: true,
        }
    }
}

pub struct PlaybackEngine {
    slide_index: usize,
    position_secs: f64,
    playing: bool,
    finished: bool,
}

impl PlaybackEngine {
    pub fn new(autoplay: bool) -> Self {
        Self {
            slide_index: 0,
            position_secs: 0.0,
            playing: autoplay,
            finished: false,
        }
    }

    pub fn info(&self) -> PlaybackInfo {
        PlaybackInfo {
            slide_index: self.slide_index,
            position_secs: self.position_secs,
            playing: self.playing,
            finished: self.finished,
        }
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance by `dt` seconds. Returns the updates to dispatch, in order.
    pub fn tick(&mut self, deck: &Deck, dt: f64) -> Vec<ProgressEvent> {
        if !self.playing || deck.is_empty() {
            return Vec::new();
        }
        let slide = &deck.slides[self.slide_index.min(deck.len() - 1)];
        self.position_secs += dt;

        if self.position_secs < slide.duration_secs {
            let fraction = self.position_secs / slide.duration_secs;
            return vec![ProgressEvent::step(&slide.id, fraction)];
        }

        // Slide finished: close it out, then open the next one.
        let mut events = vec![ProgressEvent::step(&slide.id, 1.0)];
        if self.slide_index + 1 < deck.len() {
            self.slide_index += 1;
            self.position_secs = 0.0;
            events.push(ProgressEvent::step(&deck.slides[self.slide_index].id, 0.0));
        } else {
            self.position_secs = slide.duration_secs;
            self.playing = false;
            self.finished = true;
        }
        events
    }

    pub fn toggle_pause(&mut self) {
        if self.finished {
            return;
        }
        self.playing = !self.playing;
    }

    pub fn next(&mut self, deck: &Deck) -> Option<ProgressEvent> {
        if deck.is_empty() || self.slide_index + 1 >= deck.len() {
            return None;
        }
        self.seek_to(self.slide_index + 1, deck, false)
    }

    pub fn prev(&mut self, deck: &Deck) -> Option<ProgressEvent> {
        if deck.is_empty() || self.slide_index == 0 {
            return None;
        }
        self.seek_to(self.slide_index - 1, deck, false)
    }

    /// Jump to an absolute 0-based index. Out-of-range requests clamp.
    pub fn goto(&mut self, deck: &Deck, index: usize) -> Option<ProgressEvent> {
        if deck.is_empty() {
            return None;
        }
        self.seek_to(index.min(deck.len() - 1), deck, true)
    }

    pub fn random(&mut self, deck: &Deck) -> Option<ProgressEvent> {
        if deck.len() < 2 {
            return None;
        }
        // Always land somewhere else.
        let mut rng = rand::thread_rng();
        let mut target = rng.gen_range(0..deck.len() - 1);
        if target >= self.slide_index {
            target += 1;
        }
        self.seek_to(target, deck, true)
    }

    /// Restart from the first slide. The caller resets the strip window via
    /// the replay signal before dispatching the returned update.
    pub fn replay(&mut self, deck: &Deck, autoplay: bool) -> Option<ProgressEvent> {
        if deck.is_empty() {
            return None;
        }
        self.slide_index = 0;
        self.position_secs = 0.0;
        self.finished = false;
        self.playing = autoplay;
        Some(ProgressEvent::step(&deck.slides[0].id, 0.0))
    }

    fn seek_to(&mut self, index: usize, deck: &Deck, jump: bool) -> Option<ProgressEvent> {
        self.slide_index = index;
        self.position_secs = 0.0;
        self.finished = false;
        let slide = &deck.slides[index];
        Some(if jump {
            ProgressEvent::jump(&slide.id, 0.0)
        } else {
            ProgressEvent::step(&slide.id, 0.0)
        })
    }
}
