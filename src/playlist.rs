//! The canonical playlist, derived views over it and the liked set.

use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;

use crate::library::Track;

/// Ordered list of every added track. Duplicates are allowed.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Rc<Track>>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `track` and return its index.
    pub fn append(&mut self, track: Track) -> usize {
        self.tracks.push(Rc::new(track));
        self.tracks.len() - 1
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<Track>> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Track>> {
        self.tracks.iter()
    }

    /// Index of the first entry that is the same track as `track`.
    pub fn find_index(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == track.path)
    }

    /// Entries satisfying `pred`, in playlist order.
    pub fn filter(&self, mut pred: impl FnMut(&Track) -> bool) -> FilteredView {
        FilteredView {
            tracks: self.tracks.iter().filter(|t| pred(t)).cloned().collect(),
        }
    }

    /// Case-insensitive substring search on track names.
    ///
    /// An empty query matches nothing.
    pub fn matching(&self, query: &str) -> FilteredView {
        let query = query.to_lowercase();
        if query.is_empty() {
            return FilteredView::default();
        }
        self.filter(|t| t.name.to_lowercase().contains(&query))
    }

    /// Entries whose track is in `liked`, in playlist order.
    pub fn liked(&self, liked: &LikedSet) -> FilteredView {
        self.filter(|t| liked.contains(t))
    }
}

/// A transient subset of the playlist.
///
/// Entries share the playlist's tracks rather than copying them.
#[derive(Debug, Default, Clone)]
pub struct FilteredView {
    tracks: Vec<Rc<Track>>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&Rc<Track>> {
        self.tracks.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Track>> {
        self.tracks.iter()
    }
}

#[cfg(test)]
impl FromIterator<Track> for FilteredView {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self {
            tracks: iter.into_iter().map(Rc::new).collect(),
        }
    }
}

/// Tracks marked as favourites, keyed by path.
#[derive(Debug, Default)]
pub struct LikedSet {
    paths: HashSet<PathBuf>,
}

impl LikedSet {
    pub fn contains(&self, track: &Track) -> bool {
        self.paths.contains(&track.path)
    }

    /// Flip membership of `track` and return whether it is now liked.
    pub fn toggle(&mut self, track: &Track) -> bool {
        if self.paths.remove(&track.path) {
            false
        } else {
            self.paths.insert(track.path.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
