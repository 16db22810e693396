//! In-memory `AudioEngine` used by controller tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use super::engine::{AudioEngine, EngineError};

#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub loaded: Option<PathBuf>,
    pub loads: Vec<PathBuf>,
    pub playing: bool,
    pub volume: f32,
    pub elapsed: f64,
    pub idle: bool,
    /// Paths whose `load` fails.
    pub broken: HashSet<PathBuf>,
    /// Answers for `duration_seconds`.
    pub durations: HashMap<PathBuf, f64>,
}

impl AudioEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        self.stop();
        if self.broken.contains(path) {
            return Err(EngineError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "broken"),
            });
        }
        self.loaded = Some(path.to_path_buf());
        self.loads.push(path.to_path_buf());
        self.elapsed = 0.0;
        self.idle = false;
        Ok(())
    }

    fn play(&mut self) {
        self.playing = self.loaded.is_some();
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn unpause(&mut self) {
        self.play();
    }

    fn stop(&mut self) {
        self.loaded = None;
        self.playing = false;
        self.elapsed = 0.0;
        self.idle = true;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    fn duration_seconds(&self, path: &Path) -> Option<f64> {
        self.durations.get(path).copied()
    }

    fn is_idle(&self) -> bool {
        self.idle
    }
}
