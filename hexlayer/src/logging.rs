//! Tracing subscriber setup.
//!
//! Installs a global subscriber with:
//! - an `EnvFilter` honouring `RUST_LOG`, falling back to the configured level
//! - a stderr layer with local RFC 3339 timestamps
//! - an optional non-blocking file layer (`hexlayer.log` in the configured
//!   directory)
//! - with the `profiling` feature, a Chrome trace layer writing
//!   `trace-*.json` to the working directory

use std::fs;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSettings;

/// Log file name inside the configured directory.
pub const LOG_FILE_NAME: &str = "hexlayer.log";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Failed to create log directory: {0}")]
    Directory(#[from] std::io::Error),

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Keeps the file writer flushing; drop it at process exit.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    #[cfg(feature = "profiling")]
    _chrome_guard: tracing_chrome::FlushGuard,
}

/// Build the filter: `RUST_LOG` wins, otherwise `level` for this crate.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global tracing subscriber.
pub fn init_logging(settings: &LoggingSettings) -> Result<LoggingGuard, LoggingError> {
    let filter = build_filter(&settings.level);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(false);

    let (file_layer, file_guard) = match &settings.directory {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_timer(LocalTime::rfc_3339())
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    #[cfg(feature = "profiling")]
    let (chrome_layer, chrome_guard) = {
        let (layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
            .include_args(true)
            .build();
        (Some(layer), guard)
    };
    #[cfg(not(feature = "profiling"))]
    let chrome_layer: Option<tracing_subscriber::layer::Identity> = None;

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .with(chrome_layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::debug!(level = %settings.level, "Logging initialised");

    Ok(LoggingGuard {
        _file_guard: file_guard,
        #[cfg(feature = "profiling")]
        _chrome_guard: chrome_guard,
    })
}
