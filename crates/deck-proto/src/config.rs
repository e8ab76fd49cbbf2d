use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strip: StripConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Tuning for the segmented progress strip.
///
/// `window_size` is the display budget: at most this many slides render at
/// full width; the rest collapse into edge overflow markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripConfig {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Max overflow markers shown on one side of the window.
    #[serde(default = "default_edge_overflow_cap")]
    pub edge_overflow_cap: usize,
    /// How many slides the window shifts by when the active slide leaves it.
    #[serde(default = "default_recenter_step")]
    pub recenter_step: usize,
    /// Fixed width of one overflow marker, in cells.
    #[serde(default = "default_marker_width")]
    pub marker_width: f64,
    /// Gap between adjacent segments, in cells.
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Delay before a terminal resize triggers a strip relayout.
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    /// Render tick rate for fill animations.
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Progress tick cadence. Fill transitions use this as their duration so
    /// the strip tracks playback instead of lagging or outrunning it.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Duration for slides that don't declare one.
    #[serde(default = "default_slide_secs")]
    pub default_slide_secs: f64,
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

/// User-configurable paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Deck file played when none is given on the command line.
    /// Defaults to `$XDG_CONFIG_HOME/d3ck/deck.toml`.
    #[serde(default = "default_deck_file")]
    pub deck_file: PathBuf,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            edge_overflow_cap: default_edge_overflow_cap(),
            recenter_step: default_recenter_step(),
            marker_width: default_marker_width(),
            margin: default_margin(),
            resize_debounce_ms: default_resize_debounce_ms(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            default_slide_secs: default_slide_secs(),
            autoplay: default_autoplay(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            deck_file: default_deck_file(),
        }
    }
}

fn default_window_size() -> usize {
    20
}

fn default_edge_overflow_cap() -> usize {
    3
}

fn default_recenter_step() -> usize {
    5
}

fn default_marker_width() -> f64 {
    1.0
}

fn default_margin() -> f64 {
    1.0
}

fn default_resize_debounce_ms() -> u64 {
    150
}

fn default_animation_fps() -> u64 {
    25
}

fn default_tick_ms() -> u64 {
    200
}

fn default_slide_secs() -> f64 {
    8.0
}

fn default_autoplay() -> bool {
    true
}

fn default_deck_file() -> PathBuf {
    // On Windows, check for a portable deck.toml in the executable directory
    #[cfg(windows)]
    {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let portable_deck = exe_dir.join("deck.toml");
                if portable_deck.exists() {
                    return portable_deck;
                }
            }
        }
    }

    platform::config_dir().join("deck.toml")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strip: StripConfig::default(),
            playback: PlaybackConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.strip.window_size, 20);
        assert_eq!(config.strip.edge_overflow_cap, 3);
        assert_eq!(config.strip.recenter_step, 5);
        assert_eq!(config.playback.tick_ms, 200);
        assert!(config.paths.deck_file.ends_with("d3ck/deck.toml"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [strip]
            window_size = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.strip.window_size, 8);
        assert_eq!(config.strip.recenter_step, 5);
        assert_eq!(config.playback.default_slide_secs, 8.0);
    }
}
