// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide `tracing` setup for hosts running jobs

use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;

/// Errors from [`setup_logging`].
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log path has no file name: {0}")]
    InvalidPath(String),
    #[error("a global subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Install a global subscriber writing to `log_path`.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Keep the returned
/// guard alive for as long as logs should be flushed.
pub fn setup_logging(log_path: &Path) -> Result<WorkerGuard, LoggingError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let invalid = || LoggingError::InvalidPath(log_path.display().to_string());
    let file_name = log_path.file_name().ok_or_else(invalid)?;
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))?;

    Ok(guard)
}
