//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It only
//! reads the `App`; all state changes happen in the runtime.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::rc::Rc;

use crate::app::{App, InputMode, View};
use crate::audio::AudioEngine;
use crate::config::UiSettings;
use crate::library::Track;
use crate::player::PlaybackState;

const CONTROLS: [(&str, &str); 12] = [
    ("space", "play/pause"),
    ("←/→", "prev/next"),
    ("↑/↓", "volume"),
    ("x", "stop"),
    ("s", "shuffle"),
    ("r", "repeat"),
    ("f", "like"),
    ("1-5/tab", "views"),
    ("/", "search"),
    ("j/k enter", "pick"),
    ("o", "open"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<E: AudioEngine>(frame: &mut Frame, app: &App<E>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(6),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(20)])
        .split(chunks[0]);

    draw_sidebar(frame, app, body[0]);
    draw_panel(frame, app, ui_settings, body[1]);
    draw_now_playing(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);

    if app.input_mode == InputMode::OpenPath {
        let area = centered_rect_sized(70, 3, frame.area());
        frame.render_widget(Clear, area);
        let prompt = Paragraph::new(format!("{}▏", app.path_input))
            .block(padded(" open file or folder (enter adds, esc cancels) "));
        frame.render_widget(prompt, area);
    }

    if let Some(err) = &app.error {
        let area = centered_rect_sized(64, 7, frame.area());
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(err.as_str())
            .block(padded(" error (any key closes) "))
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, area);
    }
}

fn draw_sidebar<E: AudioEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let items: Vec<ListItem> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let label = match v {
                View::Liked => format!("{} {} ({})", i + 1, v.title(), app.player.liked().len()),
                _ => format!("{} {}", i + 1, v.title()),
            };
            ListItem::new(label)
        })
        .collect();

    let mut state = ListState::default();
    state.select(View::ALL.iter().position(|v| *v == app.view));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" mixtape ")
                .title_alignment(Alignment::Center),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_panel<E: AudioEngine>(frame: &mut Frame, app: &App<E>, ui_settings: &UiSettings, area: Rect) {
    let title = format!(" {} ", app.view.title());
    match app.view {
        View::Home => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(area);
            let welcome = Paragraph::new(ui_settings.header_text.as_str())
                .alignment(Alignment::Center)
                .bold()
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(welcome, parts[0]);
            let rows = app.player.playlist().iter();
            draw_track_list(frame, app, rows, " Playlist ", parts[1]);
        }
        View::Library => {
            let rows = app.player.playlist().iter();
            draw_track_list(frame, app, rows, &title, area);
        }
        View::Liked => match liked_placeholder(app) {
            Some(text) => {
                let empty = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(title));
                frame.render_widget(empty, area);
            }
            None => draw_track_list(frame, app, app.filtered.iter(), &title, area),
        },
        View::Search => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(area);
            let cursor = if app.input_mode == InputMode::Search { "▏" } else { "" };
            let input = Paragraph::new(format!("{}{}", app.search_query, cursor))
                .block(padded(" search (esc leaves the box) "));
            frame.render_widget(input, parts[0]);

            if !app.search_query.is_empty() && app.filtered.is_empty() {
                let none = Paragraph::new("No results found")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(" results "));
                frame.render_widget(none, parts[1]);
            } else {
                draw_track_list(frame, app, app.filtered.iter(), " results ", parts[1]);
            }
        }
        View::Playlists => {
            let label = format!("Playlist ({} tracks)", app.player.playlist().len());
            let list = List::new(vec![ListItem::new(label)])
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(0));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn liked_placeholder<E: AudioEngine>(app: &App<E>) -> Option<&'static str> {
    app.player
        .liked()
        .is_empty()
        .then_some("No liked songs yet. Press f to like the playing track.")
}

/// Render numbered track rows, marking the current and liked tracks.
///
/// Only the rows that fit are built, centred on the cursor when possible.
fn draw_track_list<'a, E: AudioEngine>(
    frame: &mut Frame,
    app: &App<E>,
    rows: impl Iterator<Item = &'a Rc<Track>>,
    title: &str,
    area: Rect,
) {
    let rows: Vec<&Rc<Track>> = rows.collect();
    let total = rows.len();
    let height = area.height.saturating_sub(2) as usize;
    let sel = app.selected.min(total.saturating_sub(1));

    let start = if total <= height || height == 0 {
        0
    } else {
        sel.saturating_sub(height / 2).min(total - height)
    };
    let end = if height == 0 { total } else { (start + height).min(total) };

    let current = app.player.state().current.as_ref();
    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let is_current = current.is_some_and(|c| c.path == track.path);
            let heart = if app.player.is_liked(track) { "♥" } else { " " };
            let line = Line::from(vec![
                Span::raw(format!("{:>3} ", start + offset + 1)),
                Span::raw(format!("{} ", heart)),
                if is_current {
                    Span::raw(track.name.clone()).bold()
                } else {
                    Span::raw(track.name.clone())
                },
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 && app.input_mode != InputMode::Search {
        state.select(Some(sel - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_now_playing<E: AudioEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let np = &app.now_playing;
    let block = padded(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let title = match &np.title {
        Some(t) => format!("{} {}", if np.liked { "♥" } else { "♡" }, t),
        None => "No track selected".to_string(),
    };
    frame.render_widget(Paragraph::new(title).bold(), rows[0]);

    let gauge = Gauge::default()
        .ratio((np.percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{} / {}", np.elapsed_label, np.total_label));
    frame.render_widget(gauge, rows[1]);

    let state = match np.playback {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped if app.player.state().last_error.is_some() => "Load failed",
        PlaybackState::Stopped => "Stopped",
    };
    let status = format!(
        "{} • Shuffle: {} • Repeat: {} • Volume: {:.0}% • Tracks: {}",
        state,
        on_off(np.shuffle),
        on_off(np.repeat),
        np.volume * 100.0,
        np.track_count
    );
    frame.render_widget(Paragraph::new(status), rows[2]);
}

fn draw_footer<E: AudioEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let mut text = controls_text();
    if let Some(status) = &app.status {
        text = format!("{} — {}", status, text);
    }
    let footer = Paragraph::new(text)
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, area);
}
