//! ProgressStripPanel — host glue around the strip core.
//!
//! Pumps the injected store subscriptions on the UI tick, debounces resize
//! before re-measuring, flushes the strip's write batch right before each
//! draw, and renders the segment tree as one row of sub-cell block glyphs.

use std::time::{Duration, Instant};

use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::error;

use deck_proto::config::StripConfig;
use deck_proto::store::UiStore;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    strip::{layout::directed_offset, ProgressStrip},
    theme::{C_FILL, C_FILL_ACTIVE, C_MARKER, C_MARKER_PLAYED, C_TRACK},
};

/// Sub-cell fill glyphs: 8 eighths per cell.
const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

pub struct ProgressStripPanel {
    strip: ProgressStrip,
    resize_debounce: Duration,
    /// Deadline after the most recent resize event; relayout waits for it.
    pending_resize: Option<Instant>,
    last_width: u16,
}

impl ProgressStripPanel {
    pub fn new(cfg: &StripConfig, tick_cadence: Duration, store: &UiStore) -> Self {
        let mut strip = ProgressStrip::new(cfg, tick_cadence, store);
        strip.build();
        Self {
            strip,
            resize_debounce: Duration::from_millis(cfg.resize_debounce_ms),
            pending_resize: None,
            last_width: 0,
        }
    }

    fn render_line(&self, width: usize) -> Line<'static> {
        let total = width as f64;
        let rtl = self.strip.direction().is_rtl();
        let active = self.strip.active_index();
        let mut cells: Vec<(char, Style)> = vec![(' ', Style::default()); width];

        for (i, node) in self.strip.root().nodes.iter().enumerate() {
            let w = node.layout.width;
            if w <= 0.0 {
                continue;
            }
            let x = directed_offset(&node.layout, total, rtl);
            if x + w <= 0.0 || x >= total {
                continue;
            }
            let x0 = x.round().max(0.0) as usize;
            let x1 = ((x + w).round() as usize).min(width);
            if x0 >= x1 {
                continue;
            }
            let span = x1 - x0;

            if self.strip.is_marker(i) {
                let played = node.fill.target() >= 1.0;
                let style = Style::default().fg(if played { C_MARKER_PLAYED } else { C_MARKER });
                for cell in cells.iter_mut().take(x1).skip(x0) {
                    *cell = ('·', style);
                }
                continue;
            }

            let shown = node.fill.shown();
            let fill = Style::default().fg(if active == Some(i) { C_FILL_ACTIVE } else { C_FILL });
            let track = Style::default().fg(C_TRACK);
            if rtl {
                // Eighth glyphs are left-anchored, so RTL fills whole cells
                // from the right edge of the segment.
                let full = ((shown * span as f64).round() as usize).min(span);
                for k in 0..span {
                    cells[x0 + k] = if k >= span - full { ('█', fill) } else { ('░', track) };
                }
            } else {
                let eighths = (shown * span as f64 * 8.0).round() as usize;
                let full = (eighths / 8).min(span);
                let partial = eighths % 8;
                for k in 0..span {
                    cells[x0 + k] = if k < full {
                        ('█', fill)
                    } else if k == full && partial > 0 {
                        (BLOCKS[partial], fill)
                    } else {
                        ('░', track)
                    };
                }
            }
        }

        Line::from(
            cells
                .into_iter()
                .map(|(ch, style)| Span::styled(ch.to_string(), style))
                .collect::<Vec<_>>(),
        )
    }
}

impl Component for ProgressStripPanel {
    fn id(&self) -> ComponentId {
        ComponentId::ProgressStrip
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        self.strip.pump_store();

        if let Some(deadline) = self.pending_resize {
            if Instant::now() >= deadline {
                self.pending_resize = None;
                let width = self.last_width;
                self.strip.remeasure(|| f64::from(width));
            }
        }

        self.strip.advance_animations(Instant::now());
        Vec::new()
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::Progress {
                id,
                value,
                update_all,
            } => {
                if let Err(e) = self.strip.update_progress(id, *value, *update_all) {
                    error!("progress update rejected: {e}");
                }
            }
            Action::Replay => self.strip.on_replay(),
            Action::Resize(_, _) => {
                self.pending_resize = Some(Instant::now() + self.resize_debounce);
            }
            _ => {}
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        self.last_width = area.width;
        // First frame: no width has been measured yet.
        if self.strip.total_width() == 0.0 {
            let width = area.width;
            self.strip.remeasure(|| f64::from(width));
        }

        // Write phase: land the batch queued since the last frame.
        self.strip.flush_frame();

        let line = self.render_line(area.width as usize);
        frame.render_widget(Paragraph::new(line), area);
    }
}
