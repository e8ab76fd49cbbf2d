//! Header component — deck title, slide counter, elapsed time, direction.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_title, C_BADGE_RTL, C_FILL, C_MUTED, C_PAUSED, C_SECONDARY},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

fn fmt_time(secs: f64) -> String {
    let s = secs.max(0.0) as u64;
    format!("{}:{:02}", s / 60, s % 60)
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }

        let state_dot = if state.playback.finished {
            Span::styled("■", Style::default().fg(C_MUTED))
        } else if state.playback.playing {
            Span::styled("▶", Style::default().fg(C_FILL))
        } else {
            Span::styled("⏸", Style::default().fg(C_PAUSED))
        };

        let counter = format!(
            "{}/{}",
            state.playback.slide_index + 1,
            state.deck.len().max(1)
        );
        let time = fmt_time(state.playback.position_secs);

        // Truncate the deck title to whatever room the right side leaves.
        let right = format!("{counter}  {time}");
        let budget = (area.width as usize)
            .saturating_sub(right.width() + 6)
            .max(4);
        let mut title = state.deck.title.clone();
        while title.width() > budget {
            title.pop();
        }

        let mut spans = vec![
            Span::raw(" "),
            state_dot,
            Span::raw(" "),
            Span::styled(title, style_title()),
        ];
        if state.direction.is_rtl() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                "RTL",
                Style::default().fg(C_BADGE_RTL).add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(right, Style::default().fg(C_SECONDARY)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
