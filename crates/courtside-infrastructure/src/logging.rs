//! Structured logging with tracing
//!
//! One subscriber per process. The level filter can be overridden through
//! `COURTSIDE_LOG`. Events go to stderr and, when `file_output` is set, to
//! a file rotated daily; both use plain text or JSON per `json_format`.

use crate::constants::{LOG_FILE_STEM, LOG_FILTER_ENV};
use courtside_domain::error::{Error, Result};

pub use crate::config::LoggingConfig;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the process-wide subscriber described by `config`
///
/// Fails with a configuration error when the level is unknown or a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers = vec![console_layer(config.json_format)];
    if let Some(path) = &config.file_output {
        layers.push(file_layer(path, config.json_format));
    }

    Registry::default()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| Error::configuration_with_source("A tracing subscriber is already installed", e))?;

    info!(level = %level, json = config.json_format, "Tracing subscriber installed");
    Ok(())
}

// stdout is reserved for command output
fn console_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

fn file_layer(path: &Path, json: bool) -> BoxedLayer {
    let appender = tracing_appender::rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_stem().unwrap_or_else(|| OsStr::new(LOG_FILE_STEM)),
    );
    let layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

/// Map a configured level name (case-insensitive) to a tracing `Level`
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Unknown log level '{}' (expected trace, debug, info, warn or error)",
            level
        ))),
    }
}

/// Report whether a configuration file contributed to the loaded settings
pub fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        info!(path = %config_path.display(), "Read configuration file");
    } else {
        warn!(path = %config_path.display(), "Configuration file missing, using defaults and environment");
    }
}

/// Log a remote failure that was absorbed by the fallback path
pub fn log_remote_fallback(operation: &str, key: &str, err: &Error) {
    warn!(
        operation = operation,
        key = key,
        kind = err.kind(),
        error = %err,
        "Remote backend failed, using fallback store"
    );
}

/// Record the outcome of checking one backend during a health report
pub fn log_health_check(component: &str, healthy: bool, details: Option<&str>) {
    if healthy {
        debug!(component = component, "Backend reachable");
    } else {
        error!(
            component = component,
            details = details.unwrap_or("no error reported"),
            "Backend unreachable"
        );
    }
}
