//! Configuration system for accessgraph
//!
//! Configuration values are resolved in the following order (highest priority wins):
//!
//! 1. **Environment Variables** (`AG_*`)
//! 2. **Config File** (`accessgraph.toml`)
//! 3. **Defaults**
//!
//! # Example
//!
//! ```no_run
//! use accessgraph_core::config::AccessGraphConfig;
//!
//! let config = AccessGraphConfig::load()?;
//! config.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod access;
pub mod catalog;
pub mod logging;
pub mod sessions;

pub use access::AccessConfig;
pub use catalog::CatalogConfig;
pub use logging::LoggingConfig;
pub use sessions::SessionsConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "accessgraph.toml";

/// Complete accessgraph configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessGraphConfig {
    pub sessions: SessionsConfig,
    pub catalog: CatalogConfig,
    pub access: AccessConfig,
    pub logging: LoggingConfig,
}

impl AccessGraphConfig {
    /// Load configuration with the full supersedence chain from `accessgraph.toml`
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file, falling back to defaults if it is absent
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from a TOML file (no environment overrides)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.sessions.merge(other.sessions);
        self.catalog.merge(other.catalog);
        self.access.merge(other.access);
        self.logging.merge(other.logging);
    }

    /// Apply environment variables to configuration
    pub fn apply_env_vars(&mut self) {
        self.sessions.apply_env_vars();
        self.catalog.apply_env_vars();
        self.access.apply_env_vars();
        self.logging.apply_env_vars();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.sessions.validate()?;
        self.catalog.validate()?;
        self.access.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccessGraphConfig::default();
        assert_eq!(config.sessions.ttl_secs, 1800);
        assert_eq!(config.access.internal_domain, "@kencogroup.com");
        assert!(!config.access.local_mode);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let config = AccessGraphConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AccessGraphConfig = toml::from_str(
            r#"
            [sessions]
            ttl_secs = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.sessions.ttl_secs, 600);
        assert_eq!(config.sessions.sweep_interval_secs, 300);
        assert_eq!(config.catalog.groups_backup_file, "dash_app_group_bck.json");
    }
}
