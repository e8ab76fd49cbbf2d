//! Action enum — all user-initiated intents and internal events.

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Header,
    SlidePanel,
    ProgressStrip,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Playback ─────────────────────────────────────────────────────────────
    TogglePause,
    NextSlide,
    PrevSlide,
    /// Jump to an absolute slide index (0-based).
    GotoSlide(usize),
    RandomSlide,
    /// Restart the presentation from the first slide.
    Replay,
    /// Progress update from the playback engine, fanned out to components.
    Progress {
        id: String,
        value: f64,
        update_all: bool,
    },

    // ── UI ───────────────────────────────────────────────────────────────────
    ToggleDirection,
    OpenGoto,
    ToggleHelp,

    // ── System ───────────────────────────────────────────────────────────────
    Resize(u16, u16),
    Quit,
}
