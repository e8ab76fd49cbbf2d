//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for
//!   components).
//! - A `tokio::mpsc` channel carries terminal events in from a blocking
//!   reader task.
//! - The event loop draws each frame, then awaits the next message or timer.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - The progress tick drives the playback engine, whose updates fan out to
//!   components as `Action::Progress`.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use deck_proto::config::Config;
use deck_proto::deck::Deck;
use deck_proto::store::{Direction, UiStore};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{
        header::Header, help_overlay::HelpOverlay, progress_strip::ProgressStripPanel,
        slide_panel::SlidePanel,
    },
    playback::{PlaybackEngine, ProgressEvent},
    widgets::goto_input::{GotoAction, GotoInput},
    widgets::status_bar::{self, InputMode},
};

// ── Persistence serde structs ─────────────────────────────────────────────────

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
struct UiSessionState {
    direction_rtl: bool,
    last_slide_index: usize,
}

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
}

pub struct App {
    state: AppState,
    header: Header,
    slide_panel: SlidePanel,
    strip: ProgressStripPanel,
    help_overlay: HelpOverlay,
    goto_input: GotoInput,
    playback: PlaybackEngine,
    store: UiStore,
    config: Config,
    ui_state_path: PathBuf,
    resume_slide: usize,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, deck: Deck, store: UiStore, ui_state_path: PathBuf) -> Self {
        let session = Self::load_ui_session_state(&ui_state_path);
        if session.direction_rtl {
            store.set_direction(Direction::RightToLeft);
        }
        store.set_segments(deck.segment_ids());

        let tick_cadence = Duration::from_millis(config.playback.tick_ms);
        let strip = ProgressStripPanel::new(&config.strip, tick_cadence, &store);
        let playback = PlaybackEngine::new(config.playback.autoplay);
        let resume_slide = session.last_slide_index.min(deck.len().saturating_sub(1));
        let state = AppState::new(deck, store.direction());

        Self {
            state,
            header: Header::new(),
            slide_panel: SlidePanel::new(),
            strip,
            help_overlay: HelpOverlay::new(),
            goto_input: GotoInput::new(),
            playback,
            store,
            config,
            ui_state_path,
            resume_slide,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut progress_tick =
            tokio::time::interval(Duration::from_millis(self.config.playback.tick_ms));
        progress_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Animation + store-pump tick.
        let fps = self.config.strip.animation_fps.max(1);
        let mut ui_tick = tokio::time::interval(Duration::from_millis(1000 / fps));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            "deck loaded: {} ({} slides)",
            self.state.deck.title,
            self.state.deck.len()
        );

        // ── Initial progress update ───────────────────────────────────────────
        // Resume where the last session left off, otherwise prime the strip
        // with the first slide so it paints before the first tick.
        if self.resume_slide > 0 {
            self.dispatch(Action::GotoSlide(self.resume_slide));
        } else if let Some(first) = self.state.deck.slides.first() {
            let id = first.id.clone();
            self.dispatch(Action::Progress {
                id,
                value: 0.0,
                update_all: false,
            });
        }

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }

                _ = progress_tick.tick() => {
                    let dt = self.config.playback.tick_ms as f64 / 1000.0;
                    let events = self.playback.tick(&self.state.deck, dt);
                    for ev in events {
                        self.dispatch_progress(ev);
                    }
                    self.state.playback = self.playback.info();
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.header.tick(s));
                        all.extend(self.slide_panel.tick(s));
                        all.extend(self.strip.tick(s));
                        all.extend(self.help_overlay.tick(s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action);
                    }
                    needs_redraw = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.save_ui_session_state();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    self.handle_key(key)
                }
                Event::Resize(w, h) => {
                    self.dispatch(Action::Resize(w, h));
                    true
                }
                _ => false,
            },
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // The goto prompt swallows keys while active.
        if self.goto_input.is_active() {
            match self.goto_input.handle_key(key) {
                GotoAction::Confirmed(n) => {
                    self.state.input_mode = InputMode::Normal;
                    self.dispatch(Action::GotoSlide(n - 1));
                }
                GotoAction::Cancelled => {
                    self.state.input_mode = InputMode::Normal;
                }
                GotoAction::None => {}
            }
            return true;
        }

        // The help overlay consumes everything while open.
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            for a in actions {
                self.dispatch(a);
            }
            return true;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                self.dispatch(Action::Quit)
            }
            KeyCode::Char('q') => self.dispatch(Action::Quit),
            KeyCode::Char(' ') => self.dispatch(Action::TogglePause),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
                self.dispatch(Action::NextSlide)
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
                self.dispatch(Action::PrevSlide)
            }
            KeyCode::Char('g') => self.dispatch(Action::OpenGoto),
            KeyCode::Char('R') => self.dispatch(Action::RandomSlide),
            KeyCode::Char('r') => self.dispatch(Action::Replay),
            KeyCode::Char('d') => self.dispatch(Action::ToggleDirection),
            KeyCode::Char('?') => self.dispatch(Action::ToggleHelp),
            _ => return false,
        }
        true
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        match &action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::TogglePause => {
                self.playback.toggle_pause();
            }
            Action::NextSlide => {
                if let Some(ev) = self.playback.next(&self.state.deck) {
                    self.dispatch_progress(ev);
                }
            }
            Action::PrevSlide => {
                if let Some(ev) = self.playback.prev(&self.state.deck) {
                    self.dispatch_progress(ev);
                }
            }
            Action::GotoSlide(index) => {
                if let Some(ev) = self.playback.goto(&self.state.deck, *index) {
                    self.dispatch_progress(ev);
                }
            }
            Action::RandomSlide => {
                if let Some(ev) = self.playback.random(&self.state.deck) {
                    self.dispatch_progress(ev);
                }
            }
            Action::Replay => {
                info!("replay: restarting from the first slide");
                // The replay signal resets the strip window first; only then
                // does the fresh progress update land.
                self.forward_to_components(&action);
                if let Some(ev) = self
                    .playback
                    .replay(&self.state.deck, self.config.playback.autoplay)
                {
                    self.dispatch_progress(ev);
                }
                self.state.playback = self.playback.info();
                return;
            }
            Action::ToggleDirection => {
                let d = self.store.toggle_direction();
                self.state.direction = d;
                self.push_log(format!("direction: {}", d.label()));
            }
            Action::OpenGoto => {
                self.goto_input.activate();
                self.state.input_mode = InputMode::Goto;
            }
            _ => {}
        }

        self.state.playback = self.playback.info();
        self.forward_to_components(&action);
    }

    fn dispatch_progress(&mut self, ev: ProgressEvent) {
        self.dispatch(Action::Progress {
            id: ev.id,
            value: ev.value,
            update_all: ev.update_all,
        });
    }

    fn forward_to_components(&mut self, action: &Action) {
        let follow_ups: Vec<Action> = {
            let s = &self.state;
            let mut all = Vec::new();
            all.extend(self.header.on_action(action, s));
            all.extend(self.slide_panel.on_action(action, s));
            all.extend(self.strip.on_action(action, s));
            all.extend(self.help_overlay.on_action(action, s));
            all
        };
        for a in follow_ups {
            self.dispatch(a);
        }
    }

    fn push_log(&mut self, msg: String) {
        info!("{msg}");
        self.state.last_log = Some(msg);
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(1), // progress strip
                Constraint::Min(3),    // slide
                Constraint::Length(1), // keys bar / goto prompt
            ])
            .split(area);

        self.header.draw(frame, chunks[0], false, &self.state);
        self.strip.draw(frame, chunks[1], false, &self.state);
        self.slide_panel.draw(frame, chunks[2], true, &self.state);

        if self.goto_input.is_active() {
            self.goto_input.draw(frame, chunks[3]);
        } else {
            status_bar::draw_keys_bar(
                frame,
                chunks[3],
                self.state.input_mode,
                self.state.playback.playing,
                self.state.playback.finished,
                self.state.last_log.as_deref(),
            );
        }

        // Overlay goes last, over everything.
        self.help_overlay.draw(frame, area, false, &self.state);
    }

    // ── UI session persistence ────────────────────────────────────────────────

    fn load_ui_session_state(path: &Path) -> UiSessionState {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn save_ui_session_state(&self) {
        let session = UiSessionState {
            direction_rtl: self.state.direction.is_rtl(),
            last_slide_index: self.state.playback.slide_index,
        };
        match serde_json::to_string_pretty(&session) {
            Ok(json) => {
                if let Some(parent) = self.ui_state_path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                if let Err(e) = std::fs::write(&self.ui_state_path, json) {
                    error!("failed to save ui state: {e}");
                }
            }
            Err(e) => error!("failed to serialize ui state: {e}"),
        }
    }
}
