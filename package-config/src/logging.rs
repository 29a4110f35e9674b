//! Logging infrastructure for the package-config library.
//!
//! The library logs through the `log` facade. This module provides a
//! simple stderr backend for it with three verbosity levels, used by the
//! command-line tool.

use std::env;
use std::fmt;
use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable consulted by [`init_logger`] when no flag is given.
pub const LOG_MODE_ENV: &str = "PACKAGE_CONFIG_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use package_config::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all log output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info, and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_config::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// Returns the most detailed `log` level shown at this verbosity.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }

    /// Picks the level from CLI flags, then [`LOG_MODE_ENV`], then Normal.
    ///
    /// If both `verbose` and `quiet` are true, `verbose` takes precedence.
    /// An unrecognized environment value is ignored.
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            return Self::Verbose;
        }
        if quiet {
            return Self::Quiet;
        }

        if let Ok(env_value) = env::var(LOG_MODE_ENV) {
            if let Ok(level) = Self::parse(&env_value) {
                return level;
            }
        }

        Self::Normal
    }
}

/// A simple stderr-based `log` backend.
///
/// Messages are written as `LEVEL: message`.
///
/// # Examples
///
/// ```
/// use log::Log;
/// use package_config::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// let warning = log::Metadata::builder().level(log::Level::Warn).build();
/// let detail = log::Metadata::builder().level(log::Level::Debug).build();
/// assert!(logger.enabled(&warning));
/// assert!(!logger.enabled(&detail));
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.level_filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the stderr logger as the `log` backend.
///
/// The level comes from [`LogLevel::from_flags`]. Only the first call
/// installs a logger; later calls return the level the installed logger
/// uses.
///
/// # Examples
///
/// ```
/// use package_config::{init_logger, LogLevel};
///
/// let level = init_logger(false, true);
/// assert_eq!(level, LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> LogLevel {
    let logger = LOGGER.get_or_init(|| Logger::new(LogLevel::from_flags(verbose, quiet)));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level().level_filter());
    }
    logger.level()
}
