//! Catalog configuration: where the auth structure documents live

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding the backup and authoring documents
    /// Env: AG_CATALOG_BACKUP_DIR
    pub backup_dir: PathBuf,
    /// Authoring document: `{groups: [{name, inherits}]}`
    pub groups_file: String,
    /// Authoring document: `{app_groups: [...]}`
    pub apps_file: String,
    /// Backup of the `user_groups` store document
    pub groups_backup_file: String,
    /// Backup of the `ad_groups` store document
    pub ad_groups_backup_file: String,
    /// Backup of the `apps` store document
    pub apps_backup_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backup_dir: PathBuf::from("./auth_backup"),
            groups_file: "group_inheritance.json".to_string(),
            apps_file: "app_auth.json".to_string(),
            groups_backup_file: "dash_app_group_bck.json".to_string(),
            ad_groups_backup_file: "dash_app_ad_group_bck.json".to_string(),
            apps_backup_file: "dash_app_app_auth_bck.json".to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(dir) = env::var("AG_CATALOG_BACKUP_DIR") {
            self.backup_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let names = [
            &self.groups_file,
            &self.apps_file,
            &self.groups_backup_file,
            &self.ad_groups_backup_file,
            &self.apps_backup_file,
        ];
        if names.iter().any(|n| n.trim().is_empty()) {
            bail!("Invalid catalog file name: must not be empty");
        }
        Ok(())
    }

    pub fn groups_path(&self) -> PathBuf {
        self.backup_dir.join(&self.groups_file)
    }

    pub fn apps_path(&self) -> PathBuf {
        self.backup_dir.join(&self.apps_file)
    }
}
