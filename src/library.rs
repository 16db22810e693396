//! Track model, folder scanning and duration probing.

mod model;
mod probe;
mod scan;

pub use model::Track;
pub use probe::{DurationProbe, LoftyProbe, MetadataProbe, ProbeError};
pub use scan::{is_audio_file, scan_folder};
