//! Tracing subscriber setup.
//!
//! Console output everywhere (JSON lines in production). Production also
//! writes plain-text daily log files, `app.YYYY-MM-DD.log`, keeping the
//! newest `log_retention_days` of them.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;
use crate::error::ServiceError;

/// Log file name prefix.
pub const LOG_FILE_PREFIX: &str = "app";
/// Log file name suffix.
pub const LOG_FILE_SUFFIX: &str = "log";

/// Build the log filter. `RUST_LOG` wins when set; otherwise the configured
/// level applies, with this crate raised to debug in debug/verbose mode.
pub fn build_filter(settings: &Settings, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(settings, verbose)))
}

fn directive(settings: &Settings, verbose: bool) -> String {
    let level = settings.log_level.to_lowercase();
    if verbose || settings.debug {
        format!("item_service=debug,tower_http=debug,{level}")
    } else {
        level
    }
}

/// Daily rotating appender in `dir`, pruned to `retention_days` files.
pub fn file_appender(dir: &Path, retention_days: usize) -> Result<RollingFileAppender, ServiceError> {
    std::fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(retention_days.max(1))
        .build(dir)
        .map_err(|e| ServiceError::Logging(e.to_string()))
}

/// Install the global subscriber.
///
/// In production the returned guard flushes the file writer on drop; keep it
/// alive until shutdown.
pub fn init(settings: &Settings, verbose: bool) -> Result<Option<WorkerGuard>, ServiceError> {
    let filter = build_filter(settings, verbose);
    let production = settings.is_production();

    let (file_layer, guard) = if production {
        let appender = file_appender(&settings.log_dir, settings.log_retention_days)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(production.then(|| fmt::layer().json()))
        .with((!production).then(|| fmt::layer()))
        .with(file_layer)
        .try_init()
        .map_err(|e| ServiceError::Logging(e.to_string()))?;

    Ok(guard)
}
