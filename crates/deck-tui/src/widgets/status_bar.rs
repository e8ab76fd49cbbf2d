//! Status bar — bottom line with playback state, mode, and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_DONE, C_FILL, C_MODE_GOTO, C_MUTED, C_PAUSED, C_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Goto,
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    playing: bool,
    finished: bool,
    last_log: Option<&str>,
) {
    let (label, label_color) = match mode {
        InputMode::Goto => ("GOTO", C_MODE_GOTO),
        InputMode::Normal if finished => ("DONE", C_DONE),
        InputMode::Normal if playing => ("PLAYING", C_FILL),
        InputMode::Normal => ("PAUSED", C_PAUSED),
    };

    let keys = match mode {
        InputMode::Normal => {
            " Space pause  ←→/hl prev/next  g goto  R random  r replay  d direction  ? help  q quit"
        }
        InputMode::Goto => " type a slide number  Enter jump  Esc cancel",
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ];
    if let Some(msg) = last_log {
        spans.push(Span::styled(
            format!("  {msg}"),
            Style::default().fg(C_SEPARATOR),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
