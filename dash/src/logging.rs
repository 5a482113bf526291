//! Console logging setup for binaries and tests using this library.
//!
//! The library itself only emits `tracing` events. Nothing is printed until a
//! subscriber is installed, either by the application or through
//! [`init_logging`].

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Subscriber initialization failed: {0}")]
    SubscriberInit(String),
}

pub type LoggingResult<T> = Result<T, LoggingError>;

/// Configuration for logging output.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter. If None, `RUST_LOG` is used, falling back to INFO.
    pub level: Option<LevelFilter>,
    /// Whether to output logs to console (stderr).
    pub console: bool,
    /// Whether to print the module emitting each event.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: None, console: true, with_target: true }
    }
}

/// Initialize console logging with the given level.
pub fn init_console_logging(level: LevelFilter) -> LoggingResult<()> {
    init_logging(LoggingConfig { level: Some(level), ..LoggingConfig::default() })
}

/// Initialize logging with the given configuration.
///
/// # Errors
///
/// Returns [`LoggingError::SubscriberInit`] if a global subscriber is already
/// installed, for example by a previous call.
///
/// If console output is disabled no subscriber is installed and the tracing
/// macros stay no-ops.
pub fn init_logging(config: LoggingConfig) -> LoggingResult<()> {
    if !config.console {
        return Ok(());
    }

    let env_filter = match config.level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LevelFilter::INFO.to_string())),
    };

    let console_layer = fmt::layer()
        .with_target(config.with_target)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggingError::SubscriberInit(e.to_string()))
}
