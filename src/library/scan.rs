use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

/// Return true when `path` carries one of the configured audio extensions
/// (case-insensitive, leading dots in the settings are ignored).
pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect the audio files directly inside `dir`.
///
/// Only immediate entries are considered; subdirectories are not entered.
/// Results are sorted by file name so repeated scans append in the same order.
pub fn scan_folder(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() || entry.path().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| settings.include_hidden || !is_hidden(path))
        .filter(|path| is_audio_file(path, settings))
        .map(Track::new)
        .collect()
}
