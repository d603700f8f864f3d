//! Logging configuration and initialization.
//!
//! Stderr output filtered by `RUST_LOG`, plus optional rolling log files.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_STDERR_FILTER: &str = "coursefind=info,tower_http=info";

/// Guard that must be held for the lifetime of the application.
/// When dropped, flushes any pending log writes.
#[must_use = "Dropping this guard will stop logging - keep it alive for the program's lifetime"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    _stderr_guard: Option<WorkerGuard>,
}

/// Initialize the logging subsystem based on configuration.
///
/// Returns a guard that must be kept alive for the duration of the program.
pub fn init_logging(config: &LoggingConfig, project_root: &Path) -> Result<LoggingGuard> {
    let mut file_guard = None;
    let mut stderr_guard = None;

    let file_layer = if config.enabled {
        let (writer, guard) = file_writer(config, project_root)?;
        file_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(parse_level(&config.level)),
        )
    } else {
        None
    };

    let stderr_layer = if config.stderr {
        let stderr_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDERR_FILTER));
        let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        stderr_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_filter(stderr_filter),
        )
    } else {
        None
    };

    // Option<Layer> is itself a layer; None is a no-op
    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to initialize logging subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        _stderr_guard: stderr_guard,
    })
}

fn file_writer(config: &LoggingConfig, project_root: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let log_dir = resolve_log_dir(&config.directory, project_root);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let rotation = parse_rotation(&config.rotation);
    let appender = RollingFileAppender::new(rotation, &log_dir, &config.file_prefix);
    Ok(tracing_appender::non_blocking(appender))
}

fn resolve_log_dir(directory: &Path, project_root: &Path) -> PathBuf {
    if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        project_root.join(directory)
    }
}

fn parse_level(level: &str) -> EnvFilter {
    let level_str = match level.to_lowercase().as_str() {
        "trace" => "coursefind=trace",
        "debug" => "coursefind=debug",
        "info" => "coursefind=info",
        "warn" => "coursefind=warn",
        "error" => "coursefind=error",
        _ => {
            eprintln!(
                "Warning: Unknown log level '{}', defaulting to 'info'",
                level
            );
            "coursefind=info"
        }
    };
    EnvFilter::new(level_str)
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        "minutely" => Rotation::MINUTELY,
        "never" => Rotation::NEVER,
        _ => {
            eprintln!(
                "Warning: Unknown rotation strategy '{}', defaulting to 'daily'",
                rotation
            );
            Rotation::DAILY
        }
    }
}

/// Initialize logging with defaults (for use before config is loaded).
pub fn init_early_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDERR_FILTER)),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
