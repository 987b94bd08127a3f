//! Structured logging for the island generator.
//!
//! Installs a `tracing` subscriber with console output, optional JSON file
//! output in debug builds, and `RUST_LOG`/config-driven filtering. Events from
//! the `log` crate (used by the config layer) are bridged through
//! `tracing-subscriber`'s default `tracing-log` support.

use std::path::{Path, PathBuf};

use isle_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config specifies one.
pub const DEFAULT_FILTER: &str = "info";

const LOG_FILE: &str = "isle.log";

/// Initialize the global tracing subscriber.
///
/// - Console output with uptime timestamps, targets and levels
/// - JSON file logging to `<log_dir>/isle.log` in debug builds (optional)
/// - `RUST_LOG` takes precedence over the config's `debug.log_level`
///
/// # Examples
///
/// ```no_run
/// use isle_config::Config;
/// use isle_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
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

/// The filter directive to use absent `RUST_LOG`: the config's log level if
/// set, otherwise [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Where the JSON log file is written inside `log_dir`.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE)
}
