//! Access configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Usernames ending with this suffix get the `internal` group, others `external`
    /// Env: AG_INTERNAL_DOMAIN
    pub internal_domain: String,
    /// Skip the store entirely and serve the built-in dev identity
    /// Env: AG_LOCAL_MODE
    pub local_mode: bool,
    /// Username of the built-in dev identity
    pub dev_username: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            internal_domain: "@kencogroup.com".to_string(),
            local_mode: false,
            dev_username: "Dev".to_string(),
        }
    }
}

impl AccessConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(domain) = env::var("AG_INTERNAL_DOMAIN") {
            self.internal_domain = domain;
        }
        if let Ok(local) = env::var("AG_LOCAL_MODE") {
            self.local_mode = local.parse().unwrap_or(false);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.internal_domain.trim().is_empty() {
            bail!("Invalid internal_domain: must not be empty");
        }
        if self.dev_username.trim().is_empty() {
            bail!("Invalid dev_username: must not be empty");
        }
        Ok(())
    }
}
