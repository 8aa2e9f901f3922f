//! Static auth structure: groups, their inheritance, and the app catalog
//!
//! Two shapes exist for the same data:
//! - the **authoring documents** ([`GroupInheritanceDoc`], [`AppCatalogDoc`])
//!   that operators edit and the admin graph is built from
//! - the **store documents** ([`AuthStructure`]) kept under the `apps`,
//!   `user_groups` and `ad_groups` keys, consumed by the resolver and the
//!   propagator
//!
//! [`AuthStructureLoader`] populates the store documents from a
//! [`BackupSource`] exactly once per cold start, guarded by the
//! `auth_struct_loaded` flag.

mod backup;
mod documents;
mod loader;
mod maps;
mod validate;

pub use backup::{BackupSource, DirectoryBackup, StaticBackup};
pub use documents::{
    AppCatalogDoc, AppDef, AppGroupDef, AppInstanceDef, GroupDef, GroupInheritanceDoc,
};
pub use loader::{read_structure, AuthStructureLoader};
pub use maps::{parse_apps_map, parse_inheritance_map, AppsMap, AuthStructure, InheritanceMap};
pub use validate::{validate, Finding};

use crate::config::CatalogConfig;
use crate::store::StoreError;
use std::path::PathBuf;

/// Store key of the apps document
pub const APPS_KEY: &str = "apps";
/// Store key of the group inheritance document
pub const USER_GROUPS_KEY: &str = "user_groups";
/// Store key of the supplemental AD inheritance document
pub const AD_GROUPS_KEY: &str = "ad_groups";
/// Store key of the "structure loaded" flag
pub const LOADED_FLAG_KEY: &str = "auth_struct_loaded";

/// Errors while reading catalog or backup documents
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The authoring documents, plus the supplemental AD inheritance map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub groups: GroupInheritanceDoc,
    pub apps: AppCatalogDoc,
    pub ad_groups: InheritanceMap,
}

impl Catalog {
    pub fn new(groups: GroupInheritanceDoc, apps: AppCatalogDoc) -> Self {
        Self { groups, apps, ad_groups: InheritanceMap::new() }
    }

    pub fn with_ad_groups(mut self, ad_groups: InheritanceMap) -> Self {
        self.ad_groups = ad_groups;
        self
    }

    /// Read the authoring documents (and the AD backup if present) from the configured directory
    pub async fn from_dir(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let groups_path = config.groups_path();
        let apps_path = config.apps_path();

        let groups = backup::read_json(&groups_path).await?;
        let groups: GroupInheritanceDoc = serde_json::from_value(groups)
            .map_err(|source| CatalogError::Parse { path: groups_path, source })?;

        let apps = backup::read_json(&apps_path).await?;
        let apps: AppCatalogDoc =
            serde_json::from_value(apps).map_err(|source| CatalogError::Parse { path: apps_path, source })?;

        let ad_path = config.backup_dir.join(&config.ad_groups_backup_file);
        let ad_groups = if ad_path.exists() {
            parse_inheritance_map(&backup::read_json(&ad_path).await?, AD_GROUPS_KEY)
        } else {
            InheritanceMap::new()
        };

        Ok(Self { groups, apps, ad_groups })
    }

    /// The store-resident form of this catalog
    pub fn to_auth_structure(&self) -> AuthStructure {
        AuthStructure {
            apps: self.apps.to_apps_map(),
            user_groups: self.groups.to_inheritance_map(),
            ad_groups: self.ad_groups.clone(),
        }
    }

    /// Advisory reference checks
    pub fn validate(&self) -> Vec<Finding> {
        validate(&self.groups, &self.apps)
    }
}
