//! Logging backend for accessgraph
//!
//! Library code only uses the standard `log` macros. Binaries call
//! [`init_logging`] once at startup to install a backend that writes
//! human-readable or JSON lines to stdout or stderr.
//!
//! # Example
//!
//! ```rust,no_run
//! use accessgraph_core::config::LoggingConfig;
//!
//! accessgraph_core::logging::init_logging(&LoggingConfig::default()).unwrap();
//! log::info!("Auth structure loaded");
//! ```

pub mod formatter;

pub use formatter::{LogEntry, LogFormat};

use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the accessgraph logger
///
/// Safe to call multiple times; only the first call installs a logger.
/// An invalid configuration is reported even on later calls.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let logger = AccessLogger::from_config(config)?;
    INIT.call_once(|| {
        let max_level = logger.level;
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(max_level);
        }
    });
    Ok(())
}

/// Parse a level name into a filter
pub fn parse_level(name: &str) -> Option<log::LevelFilter> {
    match name.to_lowercase().as_str() {
        "error" => Some(log::LevelFilter::Error),
        "warn" => Some(log::LevelFilter::Warn),
        "info" => Some(log::LevelFilter::Info),
        "debug" => Some(log::LevelFilter::Debug),
        "trace" => Some(log::LevelFilter::Trace),
        "off" => Some(log::LevelFilter::Off),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
}

struct AccessLogger {
    level: log::LevelFilter,
    format: LogFormat,
    output: Output,
}

impl AccessLogger {
    fn from_config(config: &LoggingConfig) -> Result<Self> {
        let level =
            parse_level(&config.level).ok_or_else(|| anyhow!("Unknown log level: {}", config.level))?;
        let format = LogFormat::parse(&config.format)
            .ok_or_else(|| anyhow!("Unknown log format: {}", config.format))?;
        let output = match config.output.to_lowercase().as_str() {
            "stdout" => Output::Stdout,
            "stderr" => Output::Stderr,
            other => return Err(anyhow!("Unknown log output: {}", other)),
        };
        Ok(Self { level, format, output })
    }
}

impl log::Log for AccessLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format.format_entry(&LogEntry::from_record(record));
        let _ = match self.output {
            Output::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            Output::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }

    fn flush(&self) {
        let _ = match self.output {
            Output::Stdout => std::io::stdout().flush(),
            Output::Stderr => std::io::stderr().flush(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_from_default_config() {
        let logger = AccessLogger::from_config(&LoggingConfig::default()).unwrap();
        assert_eq!(logger.level, log::LevelFilter::Info);
        assert_eq!(logger.format, LogFormat::Human);
        assert_eq!(logger.output, Output::Stderr);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let config = LoggingConfig { level: "loud".to_string(), ..Default::default() };
        assert!(init_logging(&config).is_err());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig { format: "json".to_string(), ..Default::default() };
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_ok());
    }
}
