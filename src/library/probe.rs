//! Track duration probing.
//!
//! The primary source is the container metadata read through `lofty`. When
//! that fails the audio engine is asked instead, which usually means opening a
//! full decode session, so results are cached per path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lofty::prelude::AudioFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::audio::AudioEngine;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to read metadata: {0}")]
    Metadata(#[from] lofty::error::LoftyError),
    #[error("metadata reports no duration")]
    NoDuration,
}

/// Reads a track's duration without decoding it.
pub trait MetadataProbe {
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// `MetadataProbe` backed by the tag/properties reader in `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl MetadataProbe for LoftyProbe {
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        let tagged = lofty::read_from_path(path)?;
        let secs = tagged.properties().duration().as_secs_f64();
        if secs > 0.0 {
            Ok(secs)
        } else {
            Err(ProbeError::NoDuration)
        }
    }
}

/// Metadata probe with engine fallback and an optional per-path cache.
pub struct DurationProbe {
    metadata: Box<dyn MetadataProbe>,
    cache: Option<HashMap<PathBuf, f64>>,
}

impl DurationProbe {
    pub fn new(metadata: Box<dyn MetadataProbe>, cache_durations: bool) -> Self {
        Self {
            metadata,
            cache: cache_durations.then(HashMap::new),
        }
    }

    /// Resolve the duration of `path` in seconds.
    ///
    /// Metadata errors are never returned: they are logged and the engine's
    /// own duration reporting is used instead. `None` means neither source
    /// knew the duration.
    pub fn duration_of<E: AudioEngine>(&mut self, path: &Path, engine: &E) -> Option<f64> {
        if let Some(secs) = self.cache.as_ref().and_then(|c| c.get(path)) {
            return Some(*secs);
        }

        let secs = match self.metadata.probe_duration(path) {
            Ok(secs) => Some(secs),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "metadata probe failed, asking engine");
                let fallback = engine.duration_seconds(path);
                if fallback.is_none() {
                    warn!(path = %path.display(), "duration unknown");
                }
                fallback
            }
        };

        if let (Some(cache), Some(secs)) = (self.cache.as_mut(), secs) {
            cache.insert(path.to_path_buf(), secs);
        }
        secs
    }
}
