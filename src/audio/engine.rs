//! The contract between the player and whatever actually produces sound.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Commands and status queries understood by an audio engine.
///
/// The engine holds at most one loaded track. `load` prepares it paused at
/// offset zero; `play` starts it.
pub trait AudioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    /// Seconds played of the loaded track, `0.0` when nothing is loaded.
    fn elapsed_seconds(&self) -> f64;
    /// Best-effort duration of the file at `path`.
    fn duration_seconds(&self, path: &Path) -> Option<f64>;
    /// True when the engine has nothing left to play.
    fn is_idle(&self) -> bool;
}
