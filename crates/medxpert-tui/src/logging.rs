use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Base name of the log files; the daily appender adds a date suffix
pub const LOG_FILE_NAME: &str = "medxpert.log";

/// `RUST_LOG` wins over `default`
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to daily-rotated files in `dir`, for the TUI which owns the terminal.
///
/// Buffered lines are flushed when the returned guard is dropped.
pub fn init_file(dir: &Path) -> Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .max_log_files(7)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter("medxpert=info,medxpert_core=info"))
        .with(fmt_layer)
        .try_init()?;

    Ok(guard)
}

/// Log warnings to stderr, for one-shot commands
pub fn init_stderr() -> Result<()> {
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(env_filter("medxpert=warn,medxpert_core=warn"))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
