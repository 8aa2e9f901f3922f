//! Logging configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "human".to_string(), output: "stderr".to_string() }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("AG_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("AG_LOG_FORMAT") {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if crate::logging::parse_level(&self.level).is_none() {
            bail!("Invalid log level: {}", self.level);
        }
        if !["human", "json"].contains(&self.format.to_lowercase().as_str()) {
            bail!("Invalid log format: must be human or json");
        }
        if !["stdout", "stderr"].contains(&self.output.to_lowercase().as_str()) {
            bail!("Invalid log output: must be stdout or stderr");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_level_is_valid() {
        let config = LoggingConfig { level: "OFF".to_string(), ..Default::default() };
        assert!(config.validate().is_ok());
        assert_eq!(crate::logging::parse_level(&config.level), Some(log::LevelFilter::Off));
    }

    #[test]
    fn test_unknown_level_rejected() {
        let config = LoggingConfig { level: "verbose".to_string(), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_env_vars_format() {
        let mut cfg = LoggingConfig::default();
        std::env::set_var("AG_LOG_FORMAT", "json");
        cfg.apply_env_vars();
        assert_eq!(cfg.format, "json");
        std::env::remove_var("AG_LOG_FORMAT");
    }
}
