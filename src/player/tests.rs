use super::*;
use crate::audio::testing::FakeEngine;
use crate::config::Settings;
use crate::library::{DurationProbe, MetadataProbe, ProbeError, Track};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

struct FixedProbe {
    secs: Option<f64>,
    calls: Rc<Cell<usize>>,
}

impl MetadataProbe for FixedProbe {
    fn probe_duration(&self, _path: &Path) -> Result<f64, ProbeError> {
        self.calls.set(self.calls.get() + 1);
        self.secs.ok_or(ProbeError::NoDuration)
    }
}

fn player_with(secs: Option<f64>, cache: bool) -> (Player<FakeEngine>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let probe = DurationProbe::new(
        Box::new(FixedProbe {
            secs,
            calls: Rc::clone(&calls),
        }),
        cache,
    );
    let player = Player::new(FakeEngine::default(), probe, &Settings::default()).with_seed(7);
    (player, calls)
}

fn player() -> Player<FakeEngine> {
    player_with(Some(10.0), true).0
}

fn path(name: &str) -> PathBuf {
    PathBuf::from(format!("/music/{name}"))
}

fn add_all(player: &mut Player<FakeEngine>, names: &[&str]) {
    for name in names {
        player.add_track(Track::new(path(name))).unwrap();
    }
}

#[test]
fn new_player_is_stopped_with_nothing_loaded() {
    let p = player();
    assert_eq!(p.state().playback, PlaybackState::Stopped);
    assert_eq!(p.state().current_index, 0);
    assert!(p.state().current.is_none());
    assert!((p.engine().volume - 0.7).abs() < f32::EPSILON);
}

#[test]
fn first_added_track_starts_playing_and_later_ones_do_not() {
    let mut p = player();
    add_all(&mut p, &["a.mp3"]);
    assert_eq!(p.state().playback, PlaybackState::Playing);
    assert_eq!(p.state().current.as_ref().unwrap().name, "a.mp3");
    assert_eq!(p.state().duration, Some(10.0));
    assert!(p.engine().playing);

    add_all(&mut p, &["b.mp3", "c.mp3"]);
    assert_eq!(p.engine().loads, vec![path("a.mp3")]);
    assert_eq!(p.playlist().len(), 3);
}

#[test]
fn operations_on_empty_playlist_are_silent_noops() {
    let mut p = player();
    p.toggle_play_pause().unwrap();
    p.next_track().unwrap();
    p.prev_track().unwrap();
    p.toggle_like();
    assert!(p.tick().unwrap().is_none());

    assert_eq!(p.state().playback, PlaybackState::Stopped);
    assert!(p.engine().loads.is_empty());
    assert!(p.liked().is_empty());
}

#[test]
fn play_pause_cycles_and_stop_then_play_reloads_current() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3"]);
    p.next_track().unwrap();

    p.toggle_play_pause().unwrap();
    assert_eq!(p.state().playback, PlaybackState::Paused);
    assert!(!p.engine().playing);

    p.toggle_play_pause().unwrap();
    assert_eq!(p.state().playback, PlaybackState::Playing);
    assert!(p.engine().playing);

    p.stop();
    assert_eq!(p.state().playback, PlaybackState::Stopped);
    assert!(p.engine().loaded.is_none());

    p.toggle_play_pause().unwrap();
    assert_eq!(p.state().playback, PlaybackState::Playing);
    assert_eq!(p.state().current_index, 1);
    assert_eq!(p.engine().loaded, Some(path("b.mp3")));
}

#[test]
fn next_track_cycles_back_to_start_after_len_steps() {
    for len in 1..=5 {
        let mut p = player();
        let names: Vec<String> = (0..len).map(|i| format!("{i}.mp3")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        add_all(&mut p, &names);
        p.load_track(len / 2).unwrap();

        let start = p.state().current_index;
        for _ in 0..len {
            p.next_track().unwrap();
        }
        assert_eq!(p.state().current_index, start, "len {len}");
    }
}

#[test]
fn prev_and_next_are_inverse_including_wraparound() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3", "c.mp3"]);

    p.prev_track().unwrap();
    assert_eq!(p.state().current_index, 2);
    p.next_track().unwrap();
    assert_eq!(p.state().current_index, 0);

    p.next_track().unwrap();
    p.prev_track().unwrap();
    assert_eq!(p.state().current_index, 0);
}

#[test]
fn shuffle_picks_indices_within_playlist() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3", "c.mp3", "d.mp3"]);
    p.toggle_shuffle();
    assert!(p.state().shuffle);

    for _ in 0..50 {
        p.next_track().unwrap();
        assert!(p.state().current_index < 4);
        p.prev_track().unwrap();
        assert!(p.state().current_index < 4);
        assert_eq!(p.state().playback, PlaybackState::Playing);
    }
}

#[test]
fn volume_steps_are_clamped_to_unit_range() {
    let mut p = player();
    for _ in 0..5 {
        p.volume_up();
    }
    assert!((p.state().volume - 1.0).abs() < 1e-6);
    assert!((p.engine().volume - 1.0).abs() < 1e-6);

    for _ in 0..15 {
        p.volume_down();
    }
    assert_eq!(p.state().volume, 0.0);
    assert_eq!(p.engine().volume, 0.0);

    p.set_volume(0.35);
    assert!((p.engine().volume - 0.35).abs() < 1e-6);
}

#[test]
fn toggling_like_twice_restores_membership() {
    let mut p = player();
    add_all(&mut p, &["a.mp3"]);
    let track = Track::new(path("a.mp3"));

    p.toggle_like();
    assert!(p.is_liked(&track));
    p.toggle_like();
    assert!(!p.is_liked(&track));
}

#[test]
fn tick_reports_progress_percent_and_label() {
    let (mut p, _) = player_with(Some(120.0), true);
    add_all(&mut p, &["a.mp3"]);
    p.engine_mut().elapsed = 30.0;

    let progress = p.tick().unwrap().unwrap();
    assert_eq!(progress.percent(), Some(25.0));
    assert_eq!(progress.elapsed_label(), "0:30");
}

#[test]
fn tick_does_nothing_unless_playing() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3"]);
    p.toggle_play_pause().unwrap();
    p.engine_mut().elapsed = 9.99;

    assert!(p.tick().unwrap().is_none());
    assert_eq!(p.state().current_index, 0);
    assert_eq!(p.engine().loads.len(), 1);
}

#[test]
fn tick_advances_exactly_once_at_end_of_track() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3", "c.mp3"]);

    p.engine_mut().elapsed = 5.0;
    p.tick().unwrap();
    assert_eq!(p.state().current_index, 0);
    assert_eq!(p.engine().loads.len(), 1);

    p.engine_mut().elapsed = 9.95;
    p.tick().unwrap();
    assert_eq!(p.state().current_index, 1);
    assert_eq!(p.engine().loads.len(), 2);

    // The freshly loaded track reports zero elapsed on the next tick.
    assert!(p.tick().unwrap().is_none());
    assert_eq!(p.state().current_index, 1);
    assert_eq!(p.engine().loads.len(), 2);
}

#[test]
fn tick_under_repeat_restarts_the_same_track() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3"]);
    p.toggle_repeat();

    p.engine_mut().elapsed = 9.95;
    p.tick().unwrap();

    assert_eq!(p.state().current_index, 0);
    assert_eq!(p.engine().loads, vec![path("a.mp3"), path("a.mp3")]);
    assert_eq!(p.engine().elapsed, 0.0);
    assert!(p.tick().unwrap().is_none());
}

#[test]
fn unknown_duration_ends_when_engine_goes_idle() {
    let (mut p, _) = player_with(None, true);
    add_all(&mut p, &["a.mp3", "b.mp3"]);
    assert_eq!(p.state().duration, None);

    p.engine_mut().elapsed = 500.0;
    let progress = p.tick().unwrap().unwrap();
    assert_eq!(progress.percent(), None);
    assert_eq!(p.state().current_index, 0);

    p.engine_mut().idle = true;
    p.tick().unwrap();
    assert_eq!(p.state().current_index, 1);
}

#[test]
fn idle_engine_ends_track_short_of_its_probed_duration() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3"]);

    p.engine_mut().elapsed = 9.5;
    p.engine_mut().idle = true;
    p.tick().unwrap();
    assert_eq!(p.state().current_index, 1);
    assert_eq!(p.engine().loads.len(), 2);

    p.toggle_repeat();
    p.engine_mut().elapsed = 9.5;
    p.engine_mut().idle = true;
    p.tick().unwrap();
    assert_eq!(p.state().current_index, 1);
    assert_eq!(p.engine().loads, vec![path("a.mp3"), path("b.mp3"), path("b.mp3")]);
    assert_eq!(p.state().playback, PlaybackState::Playing);
}

#[test]
fn failed_load_stops_playback_and_records_error() {
    let mut p = player();
    p.engine_mut().broken.insert(path("bad.mp3"));

    let err = p.add_track(Track::new(path("bad.mp3"))).unwrap_err();
    assert!(matches!(err, PlayerError::LoadFailed { .. }));
    assert_eq!(p.playlist().len(), 1);
    assert_eq!(p.state().playback, PlaybackState::Stopped);
    assert!(p.state().last_error.is_some());

    add_all(&mut p, &["good.mp3"]);
    p.next_track().unwrap();
    assert_eq!(p.state().playback, PlaybackState::Playing);
    assert_eq!(p.state().current_index, 1);
    assert!(p.state().last_error.is_none());
}

#[test]
fn metadata_failure_falls_back_to_engine_duration() {
    let (mut p, _) = player_with(None, true);
    p.engine_mut().durations.insert(path("a.wav"), 42.0);
    add_all(&mut p, &["a.wav"]);
    assert_eq!(p.state().duration, Some(42.0));
}

#[test]
fn durations_are_probed_once_per_path_when_cached() {
    let (mut p, calls) = player_with(Some(10.0), true);
    add_all(&mut p, &["a.mp3"]);
    p.load_track(0).unwrap();
    p.load_track(0).unwrap();
    assert_eq!(calls.get(), 1);

    let (mut p, calls) = player_with(Some(10.0), false);
    add_all(&mut p, &["a.mp3"]);
    p.load_track(0).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn loading_from_a_view_uses_the_playlist_index() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3", "c.mp3", "Delta.ogg"]);

    let view = p.playlist().matching("delta");
    p.load_from_view(&view, 0).unwrap();
    assert_eq!(p.state().current_index, 3);
    assert_eq!(p.engine().loaded, Some(path("Delta.ogg")));
}

#[test]
fn loading_a_vanished_track_is_an_error_without_state_change() {
    let mut p = player();
    add_all(&mut p, &["a.mp3", "b.mp3"]);
    p.next_track().unwrap();

    let view: crate::playlist::FilteredView = [Track::new(path("gone.mp3"))].into_iter().collect();
    let err = p.load_from_view(&view, 0).unwrap_err();

    assert!(matches!(err, PlayerError::TrackNotFound(_)));
    assert_eq!(p.state().current_index, 1);
    assert_eq!(p.state().playback, PlaybackState::Playing);
    assert_eq!(p.engine().loads.len(), 2);
}

#[test]
fn subscribers_receive_state_changes() {
    let mut p = player();
    let seen: Rc<RefCell<Vec<PlayerEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);
    p.subscribe(move |ev| sink.borrow_mut().push(ev.clone()));

    add_all(&mut p, &["a.mp3"]);
    p.toggle_like();
    p.toggle_shuffle();

    let seen = seen.borrow();
    assert!(matches!(seen[0], PlayerEvent::TrackAdded { len: 1 }));
    assert!(matches!(seen[1], PlayerEvent::TrackLoaded { index: 0, liked: false, .. }));
    assert!(matches!(seen[2], PlayerEvent::PlaybackChanged(PlaybackState::Playing)));
    assert!(matches!(seen[3], PlayerEvent::LikeChanged { liked: true, .. }));
    assert!(matches!(
        seen[4],
        PlayerEvent::ModesChanged {
            repeat: false,
            shuffle: true
        }
    ));
}
