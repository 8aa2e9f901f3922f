//! Sessions configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Sessions configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Identity time-to-live in seconds, reset on every successful lookup
    /// Env: AG_SESSION_TTL
    /// Default: 1800 (30 minutes)
    pub ttl_secs: u64,

    /// Interval between background sweeps of expired keys, in seconds
    /// Env: AG_SESSION_SWEEP_INTERVAL
    /// Default: 300 (5 minutes)
    pub sweep_interval_secs: u64,

    /// Run the background sweep
    /// Env: AG_SESSION_AUTO_SWEEP
    /// Default: true
    pub auto_sweep: bool,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self { ttl_secs: 1800, sweep_interval_secs: 300, auto_sweep: true }
    }
}

impl SessionsConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn merge(&mut self, other: Self) {
        self.ttl_secs = other.ttl_secs;
        self.sweep_interval_secs = other.sweep_interval_secs;
        self.auto_sweep = other.auto_sweep;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(ttl) = env::var("AG_SESSION_TTL") {
            if let Ok(t) = ttl.parse() {
                self.ttl_secs = t;
            }
        }

        if let Ok(interval) = env::var("AG_SESSION_SWEEP_INTERVAL") {
            if let Ok(i) = interval.parse() {
                self.sweep_interval_secs = i;
            }
        }

        if let Ok(enabled) = env::var("AG_SESSION_AUTO_SWEEP") {
            self.auto_sweep = enabled.parse().unwrap_or(true);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ttl_secs == 0 {
            bail!("Invalid ttl_secs: must be greater than 0");
        }

        if self.sweep_interval_secs == 0 {
            bail!("Invalid sweep_interval_secs: must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ttl_rejected() {
        let config = SessionsConfig { ttl_secs: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_duration() {
        assert_eq!(SessionsConfig::default().ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn test_apply_env_vars_sweep() {
        let mut cfg = SessionsConfig::default();
        std::env::set_var("AG_SESSION_SWEEP_INTERVAL", "45");
        std::env::set_var("AG_SESSION_AUTO_SWEEP", "false");
        cfg.apply_env_vars();
        assert_eq!(cfg.sweep_interval_secs, 45);
        assert!(!cfg.auto_sweep);
        std::env::remove_var("AG_SESSION_SWEEP_INTERVAL");
        std::env::remove_var("AG_SESSION_AUTO_SWEEP");
    }

    #[test]
    fn test_unparsable_env_ttl_is_ignored() {
        let mut cfg = SessionsConfig::default();
        std::env::set_var("AG_SESSION_TTL", "half an hour");
        cfg.apply_env_vars();
        assert_eq!(cfg.ttl_secs, 1800);
        std::env::remove_var("AG_SESSION_TTL");
    }
}
