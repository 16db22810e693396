use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode, View};
use crate::audio::AudioEngine;
use crate::config;
use crate::ui;

/// Main terminal event loop: drives the progress poller, draws the UI and
/// dispatches key presses. Returns `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
) -> Result<(), Box<dyn std::error::Error>> {
    let interval = Duration::from_millis(settings.poller.interval_ms);
    let mut last_tick = Instant::now();

    loop {
        if last_tick.elapsed() >= interval {
            app.tick();
            last_tick = Instant::now();
        }

        app.sync();
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app) {
                    break;
                }
            }
        }
    }

    app.player.stop();
    Ok(())
}

/// Apply one key press to `app`. Returns true when the user asked to quit.
pub(super) fn handle_key_event<E: AudioEngine>(key: KeyEvent, app: &mut App<E>) -> bool {
    if app.error.is_some() {
        app.dismiss_error();
        return false;
    }

    match app.input_mode {
        InputMode::Search => handle_search_key(key, app),
        InputMode::OpenPath => handle_path_key(key, app),
        InputMode::Normal => return handle_normal_key(key, app),
    }
    false
}

fn handle_search_key<E: AudioEngine>(key: KeyEvent, app: &mut App<E>) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.cancel_input(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Down => app.select_next(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => app.select_next(),
        KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => app.select_prev(),
        KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
        _ => {}
    }
}

fn handle_path_key<E: AudioEngine>(key: KeyEvent, app: &mut App<E>) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Enter => app.submit_path(),
        KeyCode::Char(c) if !c.is_control() => app.path_input.push(c),
        _ => {}
    }
}

fn handle_normal_key<E: AudioEngine>(key: KeyEvent, app: &mut App<E>) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') => {
            let result = app.player.toggle_play_pause();
            app.report(result);
        }
        KeyCode::Right => {
            let result = app.player.next_track();
            app.report(result);
        }
        KeyCode::Left => {
            let result = app.player.prev_track();
            app.report(result);
        }
        KeyCode::Up => app.player.volume_up(),
        KeyCode::Down => app.player.volume_down(),
        KeyCode::Char('x') => app.player.stop(),
        KeyCode::Char('s') => app.player.toggle_shuffle(),
        KeyCode::Char('r') => app.player.toggle_repeat(),
        KeyCode::Char('f') => app.player.toggle_like(),
        KeyCode::Char('/') => app.show(View::Search),
        KeyCode::Char('o') => app.begin_open_path(),
        KeyCode::Tab => app.next_view(),
        KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('k') => app.select_prev(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char(c) => {
            if let Some(view) = View::from_digit(c) {
                app.show(view);
            }
        }
        _ => {}
    }
    false
}
