//! Tracing subscriber setup for front ends.
//!
//! Logs go to a daily rolling file so interactive output stays clean. The
//! level comes from `RUST_LOG`, defaulting to `info`.

use companion_core::{CompanionError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the rolling log files.
pub const LOG_FILE_PREFIX: &str = "companion.log";

/// Installs the global subscriber writing to `<log_dir>/companion.log.YYYY-MM-DD`.
///
/// Keep the returned guard alive for the lifetime of the program; dropping it
/// flushes and stops the background writer.
pub fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CompanionError::internal(format!("Failed to set global subscriber: {e}")))?;

    Ok(guard)
}
