//! Color palette and style constants for the deck TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_FILL: Color = Color::Rgb(80, 200, 120);
pub const C_FILL_ACTIVE: Color = Color::Rgb(120, 230, 160);
pub const C_TRACK: Color = Color::Rgb(44, 44, 56);
pub const C_MARKER: Color = Color::Rgb(72, 72, 88);
pub const C_MARKER_PLAYED: Color = Color::Rgb(96, 140, 110);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_GOTO: Color = Color::Rgb(255, 200, 80);
pub const C_PAUSED: Color = Color::Rgb(255, 184, 80);
pub const C_DONE: Color = Color::Rgb(80, 160, 220);
pub const C_BADGE_RTL: Color = Color::Rgb(180, 120, 220);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_title() -> Style {
    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_goto() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}
