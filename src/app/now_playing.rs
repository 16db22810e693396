use std::path::PathBuf;

use crate::player::{PlaybackState, PlayerEvent, PlayerState, format_time};

/// What the now-playing panel shows, kept in sync from `PlayerEvent`s.
#[derive(Clone, Debug)]
pub struct NowPlaying {
    pub title: Option<String>,
    pub liked: bool,
    pub playback: PlaybackState,
    /// 0.0 to 100.0
    pub percent: f64,
    pub elapsed_label: String,
    pub total_label: String,
    pub volume: f32,
    pub repeat: bool,
    pub shuffle: bool,
    pub track_count: usize,
    /// Identity of the shown track.
    path: Option<PathBuf>,
}

impl NowPlaying {
    pub fn from_state(state: &PlayerState) -> Self {
        Self {
            title: state.current.as_ref().map(|t| t.name.clone()),
            liked: false,
            playback: state.playback,
            percent: 0.0,
            elapsed_label: format_time(0.0),
            total_label: total_label(state.duration),
            volume: state.volume,
            repeat: state.repeat,
            shuffle: state.shuffle,
            track_count: 0,
            path: state.current.as_ref().map(|t| t.path.clone()),
        }
    }

    pub fn apply(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::TrackAdded { len } => self.track_count = *len,
            PlayerEvent::TrackLoaded {
                track,
                duration,
                liked,
                ..
            } => {
                self.title = Some(track.name.clone());
                self.path = Some(track.path.clone());
                self.liked = *liked;
                self.reset_progress();
                self.total_label = total_label(*duration);
            }
            PlayerEvent::LoadFailed { track, .. } => {
                self.title = Some(track.name.clone());
                self.path = Some(track.path.clone());
                self.reset_progress();
                self.total_label = total_label(None);
            }
            PlayerEvent::PlaybackChanged(state) => self.playback = *state,
            PlayerEvent::Progress(progress) => {
                if let Some(percent) = progress.percent() {
                    self.percent = percent;
                }
                self.elapsed_label = progress.elapsed_label();
            }
            PlayerEvent::VolumeChanged(volume) => self.volume = *volume,
            PlayerEvent::ModesChanged { repeat, shuffle } => {
                self.repeat = *repeat;
                self.shuffle = *shuffle;
            }
            PlayerEvent::LikeChanged { track, liked } => {
                if self.path.as_ref() == Some(&track.path) {
                    self.liked = *liked;
                }
            }
        }
    }

    fn reset_progress(&mut self) {
        self.percent = 0.0;
        self.elapsed_label = format_time(0.0);
    }
}

fn total_label(duration: Option<f64>) -> String {
    duration.map(format_time).unwrap_or_else(|| "-:--".to_string())
}
