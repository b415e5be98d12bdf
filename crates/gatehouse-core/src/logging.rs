//! Tracing setup.
//!
//! The TUI owns stdout/stderr while it runs, so logs go to a file through a
//! non-blocking writer. The returned guard must be held until exit to flush.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "GATEHOUSE_LOG";

/// Picks the filter directive: the environment wins over config, blank
/// values are ignored, and `info` is the last resort.
pub fn resolve_directive(env_value: Option<&str>, configured: &str) -> String {
    [env_value, Some(configured)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|d| !d.is_empty())
        .unwrap_or("info")
        .to_string()
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("Warning: invalid log filter '{directive}' ({err}), using 'info'");
        EnvFilter::new("info")
    })
}

/// Installs the global subscriber writing to `log_path`.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init_file_logging(log_path: &Path, configured_level: &str) -> Result<WorkerGuard> {
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_name = log_path
        .file_name()
        .context("Log path has no file name")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let directive = resolve_directive(env_value.as_deref(), configured_level);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(&directive))
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(path = %log_path.display(), %directive, "logging initialized");
    Ok(guard)
}
