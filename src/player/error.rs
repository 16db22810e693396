use std::path::PathBuf;

use thiserror::Error;

use crate::audio::EngineError;

/// Errors surfaced to the user.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("track not found in playlist: {}", .0.display())]
    TrackNotFound(PathBuf),
    #[error("could not play {}: {source}", path.display())]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: EngineError,
    },
    #[error("not an audio file or folder: {}", .0.display())]
    UnsupportedPath(PathBuf),
}
