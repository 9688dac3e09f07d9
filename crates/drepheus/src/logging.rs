//! File logging.
//!
//! The terminal belongs to the UI, so logs go to
//! `<data dir>/drepheus/drepheus.log`. Set `DREPHEUS_LOG` (for example
//! `DREPHEUS_LOG=debug`) to change the filter; the default is `info`.

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "drepheus.log";
const FILTER_ENV: &str = "DREPHEUS_LOG";

/// Initialize file logging.
///
/// Returns a guard that must live until shutdown so buffered lines are
/// flushed. Returns `None`, leaving logging off, when no log directory is
/// available.
pub fn init() -> Option<WorkerGuard> {
    let dirs = ProjectDirs::from("", "", "drepheus")?;
    let log_dir = dirs.data_local_dir();
    std::fs::create_dir_all(log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(guard)
}
