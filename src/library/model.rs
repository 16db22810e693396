use std::path::{Path, PathBuf};

/// An addressable audio file.
///
/// Two tracks are the same track when their paths are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Track {
    pub path: PathBuf,
    /// Base filename, extension included.
    pub name: String,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
