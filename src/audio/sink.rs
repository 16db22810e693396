//! Opening and decoding files into rodio sources and sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::engine::EngineError;

pub(super) type FileSource = Decoder<BufReader<File>>;

/// Open and decode `path`.
pub(super) fn open_source(path: &Path) -> Result<FileSource, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| EngineError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a paused `Sink` on `stream` holding `source`.
pub(super) fn create_paused_sink(stream: &OutputStream, source: FileSource, volume: f32) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    sink
}
