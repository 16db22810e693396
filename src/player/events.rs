use std::rc::Rc;

use crate::library::Track;

use super::progress::Progress;
use super::state::PlaybackState;

/// Notifications published by the player after its state changed.
#[derive(Clone, Debug)]
pub enum PlayerEvent {
    /// A track was appended; `len` is the new playlist length.
    TrackAdded { len: usize },
    /// A track was loaded and started from the beginning.
    TrackLoaded {
        index: usize,
        track: Rc<Track>,
        duration: Option<f64>,
        liked: bool,
    },
    /// The engine refused to load a track; playback is stopped.
    LoadFailed { index: usize, track: Rc<Track>, reason: String },
    PlaybackChanged(PlaybackState),
    Progress(Progress),
    VolumeChanged(f32),
    ModesChanged { repeat: bool, shuffle: bool },
    LikeChanged { track: Rc<Track>, liked: bool },
}
