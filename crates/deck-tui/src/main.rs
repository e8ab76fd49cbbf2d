use std::path::PathBuf;

use deck_proto::{config::Config, deck, platform, store::UiStore};
use deck_tui::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("tui.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("d3ck log: {}", log_path.display());

    tracing::info!("d3ck starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    // ── Load deck ────────────────────────────────────────────────────────────
    // An explicit path argument beats the configured default; a missing
    // default falls back to a generated demo deck.
    let deck = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => deck::load_deck_from_toml(&path, config.playback.default_slide_secs)?,
        None => {
            let path = &config.paths.deck_file;
            if path.exists() {
                deck::load_deck_from_toml(path, config.playback.default_slide_secs)?
            } else {
                tracing::warn!("no deck at {}, using demo deck", path.display());
                deck::demo_deck(50, config.playback.default_slide_secs)
            }
        }
    };

    // ── State store (segment list + direction) ───────────────────────────────
    let store = UiStore::new();

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let ui_state_path = data_dir.join("ui_state.json");
    let app = App::new(config, deck, store, ui_state_path);
    app.run().await?;

    Ok(())
}
