//! Run logging.
//!
//! Pipeline progress goes through `tracing`; the binary installs a
//! `tracing-subscriber` fmt layer writing to stderr so stdout stays free
//! for the JSON printed by the debug commands.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Outcome flavour of a progress message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠️ ",
        }
    }
}

/// Emit one progress message at the matching `tracing` level.
pub fn log(level: LogLevel, msg: impl std::fmt::Display) {
    let prefix = level.prefix();
    match level {
        LogLevel::Info | LogLevel::Success => tracing::info!("{}{}", prefix, msg),
        LogLevel::Warning => tracing::warn!("{}{}", prefix, msg),
    }
}

pub fn log_info(msg: impl std::fmt::Display) {
    log(LogLevel::Info, msg);
}

pub fn log_success(msg: impl std::fmt::Display) {
    log(LogLevel::Success, msg);
}

pub fn log_warning(msg: impl std::fmt::Display) {
    log(LogLevel::Warning, msg);
}

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is unset or ignored.
    pub level: LevelFilter,
    /// Honor `RUST_LOG` when it is set.
    pub use_env_filter: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            use_env_filter: true,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Map `-q` / `-v` counts to a level.
    ///
    /// - `-q`: warnings and errors only
    /// - none: info
    /// - `-v`: debug
    /// - `-vv`: trace
    ///
    /// Explicit flags take precedence over `RUST_LOG`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        let level = match (quiet, verbose) {
            (true, _) => LevelFilter::WARN,
            (false, 0) => LevelFilter::INFO,
            (false, 1) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Self {
            level,
            use_env_filter: !quiet && verbose == 0,
            ..Self::default()
        }
    }

    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        if self.use_env_filter {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return filter;
            }
        }
        EnvFilter::default().add_directive(self.level.into())
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time()
        .try_init()
}
