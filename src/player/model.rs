use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::audio::AudioEngine;
use crate::config::Settings;
use crate::library::{DurationProbe, Track};
use crate::playlist::{FilteredView, LikedSet, Playlist};

use super::error::PlayerError;
use super::events::PlayerEvent;
use super::progress::Progress;
use super::state::{PlaybackState, PlayerState};

type Listener = Box<dyn FnMut(&PlayerEvent)>;

/// The playback controller.
///
/// All methods are meant to be called from the single UI thread. Operations
/// on an empty playlist are silent no-ops.
pub struct Player<E: AudioEngine> {
    engine: E,
    probe: DurationProbe,
    playlist: Playlist,
    liked: LikedSet,
    state: PlayerState,
    volume_step: f32,
    end_tolerance: f64,
    rng: StdRng,
    listeners: Vec<Listener>,
}

impl<E: AudioEngine> Player<E> {
    pub fn new(mut engine: E, probe: DurationProbe, settings: &Settings) -> Self {
        let mut state = PlayerState::new(settings.playback.volume);
        state.repeat = settings.playback.repeat;
        state.shuffle = settings.playback.shuffle;
        engine.set_volume(state.volume);

        Self {
            engine,
            probe,
            playlist: Playlist::new(),
            liked: LikedSet::default(),
            state,
            volume_step: settings.playback.volume_step,
            end_tolerance: settings.poller.end_tolerance_secs,
            rng: StdRng::from_entropy(),
            listeners: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Register a listener for every future `PlayerEvent`.
    pub fn subscribe(&mut self, listener: impl FnMut(&PlayerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: PlayerEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn liked(&self) -> &LikedSet {
        &self.liked
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Append `track` to the playlist and return its index.
    ///
    /// The very first track is loaded and started right away. If that load
    /// fails the track stays in the playlist and the load error is returned.
    pub fn add_track(&mut self, track: Track) -> Result<usize, PlayerError> {
        let index = self.playlist.append(track);
        let len = self.playlist.len();
        debug!(index, len, "track added");
        self.emit(PlayerEvent::TrackAdded { len });

        if len == 1 {
            self.load_track(0)?;
        }
        Ok(index)
    }

    /// Load the playlist entry at `index` and start it from the beginning.
    ///
    /// `index` is always a playlist index; use [`Player::load_from_view`] for
    /// positions in a filtered view.
    pub fn load_track(&mut self, index: usize) -> Result<(), PlayerError> {
        let Some(track) = self.playlist.get(index).map(Rc::clone) else {
            debug!(index, len = self.playlist.len(), "load ignored, no such index");
            return Ok(());
        };

        self.state.current_index = index;
        self.state.current = Some(Rc::clone(&track));
        self.state.duration = None;

        if let Err(source) = self.engine.load(&track.path) {
            warn!(path = %track.path.display(), error = %source, "load failed");
            let reason = source.to_string();
            self.state.playback = PlaybackState::Stopped;
            self.state.last_error = Some(reason.clone());
            self.emit(PlayerEvent::LoadFailed {
                index,
                track: Rc::clone(&track),
                reason,
            });
            self.emit(PlayerEvent::PlaybackChanged(PlaybackState::Stopped));
            return Err(PlayerError::LoadFailed {
                path: track.path.clone(),
                source,
            });
        }

        self.engine.play();
        self.state.playback = PlaybackState::Playing;
        self.state.last_error = None;
        self.state.duration = self.probe.duration_of(&track.path, &self.engine);
        debug!(index, path = %track.path.display(), duration = ?self.state.duration, "track loaded");

        let liked = self.liked.contains(&track);
        self.emit(PlayerEvent::TrackLoaded {
            index,
            track,
            duration: self.state.duration,
            liked,
        });
        self.emit(PlayerEvent::PlaybackChanged(PlaybackState::Playing));
        Ok(())
    }

    /// Load the track shown at `pos` of `view`, resolved to its playlist index.
    pub fn load_from_view(&mut self, view: &FilteredView, pos: usize) -> Result<(), PlayerError> {
        let Some(track) = view.get(pos) else {
            return Ok(());
        };
        let index = self
            .playlist
            .find_index(track)
            .ok_or_else(|| PlayerError::TrackNotFound(track.path.clone()))?;
        self.load_track(index)
    }

    /// Play when stopped, otherwise pause or resume.
    pub fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        if self.playlist.is_empty() {
            return Ok(());
        }

        match self.state.playback {
            PlaybackState::Stopped => return self.load_track(self.state.current_index),
            PlaybackState::Paused => {
                self.engine.unpause();
                self.state.playback = PlaybackState::Playing;
            }
            PlaybackState::Playing => {
                self.engine.pause();
                self.state.playback = PlaybackState::Paused;
            }
        }
        self.emit(PlayerEvent::PlaybackChanged(self.state.playback));
        Ok(())
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.state.playback = PlaybackState::Stopped;
        self.emit(PlayerEvent::PlaybackChanged(PlaybackState::Stopped));
    }

    pub fn next_track(&mut self) -> Result<(), PlayerError> {
        let len = self.playlist.len();
        if len == 0 {
            return Ok(());
        }
        let index = if self.state.shuffle {
            self.rng.gen_range(0..len)
        } else {
            (self.state.current_index + 1) % len
        };
        self.load_track(index)
    }

    pub fn prev_track(&mut self) -> Result<(), PlayerError> {
        let len = self.playlist.len();
        if len == 0 {
            return Ok(());
        }
        let index = if self.state.shuffle {
            self.rng.gen_range(0..len)
        } else {
            (self.state.current_index + len - 1) % len
        };
        self.load_track(index)
    }

    /// Forward `volume` to the engine. Callers keep it within `0.0..=1.0`.
    pub fn set_volume(&mut self, volume: f32) {
        self.state.volume = volume;
        self.engine.set_volume(volume);
        self.emit(PlayerEvent::VolumeChanged(volume));
    }

    pub fn volume_up(&mut self) {
        self.set_volume((self.state.volume + self.volume_step).clamp(0.0, 1.0));
    }

    pub fn volume_down(&mut self) {
        self.set_volume((self.state.volume - self.volume_step).clamp(0.0, 1.0));
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat = !self.state.repeat;
        debug!(repeat = self.state.repeat, "repeat toggled");
        self.emit_modes();
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        debug!(shuffle = self.state.shuffle, "shuffle toggled");
        self.emit_modes();
    }

    fn emit_modes(&mut self) {
        self.emit(PlayerEvent::ModesChanged {
            repeat: self.state.repeat,
            shuffle: self.state.shuffle,
        });
    }

    /// Flip the liked mark of the current track. No-op when nothing is loaded.
    pub fn toggle_like(&mut self) {
        let Some(track) = self.state.current.clone() else {
            return;
        };
        let liked = self.liked.toggle(&track);
        self.emit(PlayerEvent::LikeChanged { track, liked });
    }

    pub fn is_liked(&self, track: &Track) -> bool {
        self.liked.contains(track)
    }

    /// One poller tick.
    ///
    /// Only acts while playing. Publishes progress when the engine reports a
    /// positive elapsed time, and advances (or restarts, under repeat) once
    /// the elapsed time reaches the end tolerance window. The engine going
    /// idle also counts as the end, since the probed duration can overstate
    /// what actually decodes.
    pub fn tick(&mut self) -> Result<Option<Progress>, PlayerError> {
        if self.state.playback != PlaybackState::Playing {
            return Ok(None);
        }

        let elapsed = self.engine.elapsed_seconds();
        let progress = Progress::new(elapsed, self.state.duration);
        let reported = elapsed > 0.0;

        let mut ended = false;
        if reported {
            self.emit(PlayerEvent::Progress(progress));
            ended = progress.is_at_end(self.end_tolerance);
        }
        if self.engine.is_idle() {
            ended = true;
        }

        if ended {
            debug!(elapsed, repeat = self.state.repeat, idle = self.engine.is_idle(), "end of track");
            if self.state.repeat {
                self.load_track(self.state.current_index)?;
            } else {
                self.next_track()?;
            }
        }

        Ok(reported.then_some(progress))
    }
}
