//! Log setup
//!
//! The terminal belongs to the UI, so all tracing output goes to a file
//! through a non-blocking writer.

use std::io;
use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("log file path '{0}' has no file name")]
    NoFileName(String),

    #[error("could not create log directory: {0}")]
    Io(#[from] io::Error),

    #[error("could not install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber writing to `path`.
///
/// The returned guard flushes pending lines when dropped and must be held
/// for the life of the program.
pub fn init(path: &Path) -> Result<WorkerGuard, LoggingError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::NoFileName(path.display().to_string()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()?;

    Ok(guard)
}
