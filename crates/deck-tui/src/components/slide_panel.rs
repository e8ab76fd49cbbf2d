//! SlidePanel — renders the active slide's title and body.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_secondary, C_BADGE_RTL},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct SlidePanel;

impl SlidePanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for SlidePanel {
    fn id(&self) -> ComponentId {
        ComponentId::SlidePanel
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let Some(slide) = state.current_slide() else {
            let block = pane_chrome("no deck", focused, None);
            frame.render_widget(block, area);
            return;
        };

        let badge = state.direction.is_rtl().then_some(Badge {
            text: "RTL",
            color: C_BADGE_RTL,
        });
        let block = pane_chrome(&slide.title, focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = slide
            .body
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style_secondary())))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            inner,
        );
    }
}
