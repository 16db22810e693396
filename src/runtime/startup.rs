use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::audio::AudioEngine;
use crate::config;

/// Route `tracing` output to a daily rolling file.
///
/// The terminal belongs to the UI, so nothing is written to stderr. Returns
/// `None` when no log directory can be used; the app still runs, silently.
pub fn init_logging(settings: &config::Settings) -> Option<WorkerGuard> {
    let dir = settings.log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("mixtape: cannot create log dir {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(&dir, &settings.log.file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .ok()?;

    Some(guard)
}

/// Add every path given on the command line. Failures end up in the error
/// dialog shown on the first frame.
pub fn add_cli_paths<E: AudioEngine>(app: &mut App<E>, args: impl Iterator<Item = String>) {
    for arg in args {
        let result = app.add_path(std::path::Path::new(&arg));
        app.report(result);
    }
}
