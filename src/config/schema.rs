use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mixtape/config.toml` or `~/.config/mixtape/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MIXTAPE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub poller: PollerSettings,
    pub library: LibrarySettings,
    pub probe: ProbeSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial volume, 0.0 to 1.0.
    pub volume: f32,
    /// Amount added or removed by the volume keys.
    pub volume_step: f32,
    /// Whether repeat starts enabled.
    pub repeat: bool,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            volume_step: 0.1,
            repeat: false,
            shuffle: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerSettings {
    /// Interval between progress ticks (milliseconds).
    pub interval_ms: u64,
    /// A track counts as finished once elapsed time is within this many
    /// seconds of its duration.
    pub end_tolerance_secs: f64,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            end_tolerance_secs: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether adding a folder picks up hidden files (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into(), "ogg".into()],
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Remember probed durations per path for the rest of the session.
    pub cache_durations: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            cache_durations: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered in the home panel.
    pub header_text: String,
    /// Panel shown at startup.
    pub start_view: StartView,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "Welcome to mixtape".to_string(),
            start_view: StartView::Home,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartView {
    #[default]
    Home,
    Search,
    #[serde(alias = "your-library")]
    Library,
    #[serde(alias = "liked-songs")]
    Liked,
    Playlists,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Directory for log files. Defaults to `$XDG_STATE_HOME/mixtape`.
    pub dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Prefix of the daily rolling log file.
    pub file_name: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            filter: "info".to_string(),
            file_name: "mixtape.log".to_string(),
        }
    }
}
