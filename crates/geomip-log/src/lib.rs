//! Structured logging for the terrain crates.
//!
//! Library crates log through the `log` facade; this crate installs the
//! `tracing` subscriber that collects those records, prints them to the
//! console and, in debug builds, mirrors them to a JSON file.

use geomip_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "geomip.log";

/// Resolve the filter string from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the tracing subscriber.
///
/// Sets up:
/// - Console output with uptime timestamps, module paths, and severity levels
/// - JSON file logging in debug builds when `log_dir` is given
/// - Environment-based filtering (`RUST_LOG` overrides the config)
///
/// # Examples
///
/// ```no_run
/// use geomip_config::Config;
/// use geomip_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_string(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
