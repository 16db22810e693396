use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioEngine;
use crate::library::{DurationProbe, LoftyProbe};
use crate::player::Player;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    let _log_guard = startup::init_logging(&settings);
    info!(version = env!("CARGO_PKG_VERSION"), "starting");
    if let Some(reason) = fallback {
        warn!(%reason, "using default settings");
    }

    let engine = RodioEngine::init()?;
    let probe = DurationProbe::new(Box::new(LoftyProbe), settings.probe.cache_durations);
    let player = Player::new(engine, probe, &settings);
    let mut app = App::new(player, &settings);

    startup::add_cli_paths(&mut app, env::args().skip(1));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
