//! GotoInput — wraps tui-input for the "jump to slide" prompt.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{style_goto, style_muted};

pub enum GotoAction {
    /// A valid 1-based slide number was confirmed.
    Confirmed(usize),
    Cancelled,
    None,
}

pub struct GotoInput {
    input: Input,
    pub active: bool,
}

impl GotoInput {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            active: false,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.input = Input::default();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle a key event. Returns what happened.
    pub fn handle_key(&mut self, key: KeyEvent) -> GotoAction {
        match key.code {
            KeyCode::Esc => {
                self.deactivate();
                GotoAction::Cancelled
            }
            KeyCode::Enter => {
                self.deactivate();
                match self.input.value().trim().parse::<usize>() {
                    Ok(n) if n >= 1 => GotoAction::Confirmed(n),
                    _ => GotoAction::Cancelled,
                }
            }
            // Digits only; everything else is ignored rather than inserted.
            KeyCode::Char(c) if !c.is_ascii_digit() => GotoAction::None,
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                GotoAction::None
            }
        }
    }

    /// Render the prompt into `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(": slide number…", style_muted())
        } else {
            Span::styled(format!(": {}", value), style_goto())
        };
        let paragraph = Paragraph::new(Line::from(vec![display])).style(style_goto());
        frame.render_widget(paragraph, area);

        if self.active {
            let cursor_x = area.x + 2 + self.input.visual_cursor() as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}

impl Default for GotoInput {
    fn default() -> Self {
        Self::new()
    }
}
