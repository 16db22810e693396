//! Application model: `App` routes between views, owns the search and path
//! prompts, and forwards user intents to the `Player`.

use std::path::Path;
use std::sync::mpsc::{self, Receiver};

use tracing::{info, warn};

use crate::audio::AudioEngine;
use crate::config::{LibrarySettings, Settings};
use crate::library::{Track, is_audio_file, scan_folder};
use crate::player::{Player, PlayerError, PlayerEvent};
use crate::playlist::FilteredView;

use super::now_playing::NowPlaying;
use super::view::{InputMode, View};

/// The main application model.
pub struct App<E: AudioEngine> {
    pub player: Player<E>,
    events: Receiver<PlayerEvent>,
    pub now_playing: NowPlaying,

    pub view: View,
    pub input_mode: InputMode,
    pub search_query: String,
    pub path_input: String,
    /// Search results or liked songs, depending on `view`.
    pub filtered: FilteredView,
    /// Cursor position in the list of the current view.
    pub selected: usize,

    /// Pending error dialog.
    pub error: Option<String>,
    /// One-line feedback shown in the footer.
    pub status: Option<String>,

    library: LibrarySettings,
}

impl<E: AudioEngine> App<E> {
    /// Create a new `App` around `player`, subscribing to its events.
    pub fn new(mut player: Player<E>, settings: &Settings) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerEvent>();
        player.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });
        let now_playing = NowPlaying::from_state(player.state());

        let mut app = Self {
            player,
            events: rx,
            now_playing,
            view: View::Home,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            path_input: String::new(),
            filtered: FilteredView::default(),
            selected: 0,
            error: None,
            status: None,
            library: settings.library.clone(),
        };
        app.show(settings.ui.start_view.into());
        app
    }

    /// Apply pending player events to the now-playing snapshot.
    ///
    /// In the playlist views the cursor follows the loaded track.
    pub fn sync(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match &event {
                PlayerEvent::TrackLoaded { index, .. } => self.follow(*index),
                PlayerEvent::LoadFailed { index, track, reason } => {
                    self.follow(*index);
                    self.status = Some(format!("Cannot play {}: {reason}", track.name));
                }
                _ => {}
            }
            self.now_playing.apply(&event);
        }
    }

    fn follow(&mut self, index: usize) {
        if matches!(self.view, View::Home | View::Library) {
            self.selected = index;
        }
    }

    /// Switch the visible panel.
    pub fn show(&mut self, view: View) {
        self.view = view;
        self.input_mode = InputMode::Normal;
        self.selected = 0;
        match view {
            View::Liked => {
                self.filtered = self.player.playlist().liked(self.player.liked());
            }
            View::Search => {
                self.input_mode = InputMode::Search;
                self.filtered = self.player.playlist().matching(&self.search_query);
            }
            View::Home | View::Library | View::Playlists => {}
        }
    }

    pub fn next_view(&mut self) {
        self.show(self.view.next());
    }

    /// Number of rows in the list of the current view.
    pub fn list_len(&self) -> usize {
        match self.view {
            View::Home | View::Library => self.player.playlist().len(),
            View::Search | View::Liked => self.filtered.len(),
            View::Playlists => 1,
        }
    }

    /// Move the cursor down, wrapping to the top.
    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.refresh_search();
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.refresh_search();
    }

    fn refresh_search(&mut self) {
        self.filtered = self.player.playlist().matching(&self.search_query);
        self.selected = 0;
    }

    /// Play the row under the cursor.
    ///
    /// Rows of search results and liked songs are resolved back to their
    /// playlist position first. Playing a search result returns to Home.
    pub fn play_selected(&mut self) {
        match self.view {
            View::Home | View::Library => {
                let result = self.player.load_track(self.selected);
                self.report(result);
            }
            View::Search => {
                let result = self.player.load_from_view(&self.filtered, self.selected);
                if self.report(result) && !self.filtered.is_empty() {
                    self.show(View::Home);
                }
            }
            View::Liked => {
                let result = self.player.load_from_view(&self.filtered, self.selected);
                self.report(result);
            }
            View::Playlists => self.show(View::Library),
        }
    }

    pub fn begin_open_path(&mut self) {
        self.path_input.clear();
        self.input_mode = InputMode::OpenPath;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Add whatever the path prompt holds and close it.
    pub fn submit_path(&mut self) {
        self.input_mode = InputMode::Normal;
        let input = std::mem::take(&mut self.path_input);
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        let result = self.add_path(Path::new(input));
        if let Ok(added) = &result {
            self.status = Some(match added {
                0 => format!("No audio files in {input}"),
                1 => "Added 1 track".to_string(),
                n => format!("Added {n} tracks"),
            });
        }
        self.report(result);
    }

    /// Append a single audio file, or every audio file directly inside a
    /// folder. Returns how many tracks were added.
    pub fn add_path(&mut self, path: &Path) -> Result<usize, PlayerError> {
        let tracks = if path.is_dir() {
            scan_folder(path, &self.library)
        } else if path.is_file() && is_audio_file(path, &self.library) {
            vec![Track::new(path)]
        } else {
            return Err(PlayerError::UnsupportedPath(path.to_path_buf()));
        };

        let added = tracks.len();
        let mut first_error = None;
        for track in tracks {
            if let Err(e) = self.player.add_track(track) {
                first_error.get_or_insert(e);
            }
        }
        info!(path = %path.display(), added, "tracks added");

        match first_error {
            Some(e) => Err(e),
            None => Ok(added),
        }
    }

    /// Run one poller tick.
    pub fn tick(&mut self) {
        let result = self.player.tick().map(|_| ());
        self.report(result);
    }

    /// Turn an error into the error dialog. Returns true on success.
    pub fn report<T>(&mut self, result: Result<T, PlayerError>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "operation failed");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
