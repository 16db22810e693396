use std::path::Path;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use super::engine::{AudioEngine, EngineError};
use super::sink::{create_paused_sink, open_source};

/// `AudioEngine` playing through the default output device.
///
/// The output stream is acquired by [`RodioEngine::init`] and released when
/// the engine is dropped. Create exactly one per process.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
    /// Length of the loaded source as reported by the decoder.
    source_duration: Option<Duration>,
}

impl RodioEngine {
    /// Open the default output device. Volume starts at full until the
    /// player sets it.
    pub fn init() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when the stream is dropped, which would land on
        // top of the terminal UI.
        stream.log_on_drop(false);
        debug!("audio output stream opened");

        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
            source_duration: None,
        })
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        self.stop();

        let source = open_source(path)?;
        self.source_duration = source.total_duration();
        self.sink = Some(create_paused_sink(&self.stream, source, self.volume));
        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn unpause(&mut self) {
        self.play();
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.source_duration = None;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn elapsed_seconds(&self) -> f64 {
        match self.sink.as_ref() {
            // A drained sink no longer tracks its position; report the end.
            Some(sink) if sink.empty() => self
                .source_duration
                .unwrap_or_else(|| sink.get_pos())
                .as_secs_f64(),
            Some(sink) => sink.get_pos().as_secs_f64(),
            None => 0.0,
        }
    }

    fn duration_seconds(&self, path: &Path) -> Option<f64> {
        open_source(path)
            .ok()?
            .total_duration()
            .map(|d| d.as_secs_f64())
    }

    fn is_idle(&self) -> bool {
        self.sink.as_ref().map_or(true, Sink::empty)
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.stop();
        debug!("audio output stream released");
    }
}
