use std::rc::Rc;

use crate::library::Track;

/// The playback state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Everything the controller knows about playback.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub playback: PlaybackState,
    /// Index into the playlist; only meaningful while the playlist is non-empty.
    pub current_index: usize,
    pub current: Option<Rc<Track>>,
    pub volume: f32,
    pub repeat: bool,
    pub shuffle: bool,
    /// Duration of the current track in seconds, if it could be probed.
    pub duration: Option<f64>,
    /// Why the last load failed; cleared by the next successful load.
    pub last_error: Option<String>,
}

impl PlayerState {
    pub fn new(volume: f32) -> Self {
        Self {
            playback: PlaybackState::Stopped,
            current_index: 0,
            current: None,
            volume,
            repeat: false,
            shuffle: false,
            duration: None,
            last_error: None,
        }
    }
}
