//! Backup sources the auth structure is (re)populated from

use super::maps::{parse_apps_map, parse_inheritance_map, AuthStructure};
use super::{Catalog, CatalogError};
use crate::config::CatalogConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Where a cold store gets its auth structure from
#[async_trait::async_trait]
pub trait BackupSource: Send + Sync {
    /// Fetch a full copy of the auth structure
    async fn fetch(&self) -> Result<AuthStructure, CatalogError>;

    /// Name for logging
    fn name(&self) -> &str;
}

/// Backup files in a directory
///
/// The apps and groups backups are required; a missing AD backup reads as
/// an empty map.
#[derive(Debug, Clone)]
pub struct DirectoryBackup {
    apps: PathBuf,
    user_groups: PathBuf,
    ad_groups: PathBuf,
}

impl DirectoryBackup {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            apps: config.backup_dir.join(&config.apps_backup_file),
            user_groups: config.backup_dir.join(&config.groups_backup_file),
            ad_groups: config.backup_dir.join(&config.ad_groups_backup_file),
        }
    }

    /// Whether the required backup files are present
    pub fn is_available(&self) -> bool {
        self.apps.exists() && self.user_groups.exists()
    }
}

#[async_trait::async_trait]
impl BackupSource for DirectoryBackup {
    async fn fetch(&self) -> Result<AuthStructure, CatalogError> {
        let apps = read_json(&self.apps).await?;
        let user_groups = read_json(&self.user_groups).await?;
        let ad_groups = if self.ad_groups.exists() {
            parse_inheritance_map(&read_json(&self.ad_groups).await?, "ad_groups")
        } else {
            log::warn!("No AD group backup at {}; using an empty map", self.ad_groups.display());
            Default::default()
        };

        Ok(AuthStructure {
            apps: parse_apps_map(&apps, "apps"),
            user_groups: parse_inheritance_map(&user_groups, "user_groups"),
            ad_groups,
        })
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// A fixed in-memory auth structure
#[derive(Debug, Clone, Default)]
pub struct StaticBackup {
    structure: AuthStructure,
}

impl StaticBackup {
    pub fn new(structure: AuthStructure) -> Self {
        Self { structure }
    }
}

impl From<&Catalog> for StaticBackup {
    fn from(catalog: &Catalog) -> Self {
        Self::new(catalog.to_auth_structure())
    }
}

#[async_trait::async_trait]
impl BackupSource for StaticBackup {
    async fn fetch(&self) -> Result<AuthStructure, CatalogError> {
        Ok(self.structure.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

pub(crate) async fn read_json(path: &Path) -> Result<Value, CatalogError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content).map_err(|source| CatalogError::Parse { path: path.to_path_buf(), source })
}
