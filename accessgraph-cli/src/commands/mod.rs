//! Subcommand implementations
//!
//! Each command returns its output instead of printing it so it can be
//! tested without capturing stdout.

pub mod access;
pub mod check;
pub mod graph;
pub mod resolve;
pub mod validate;

use accessgraph_core::access::AccessResolver;
use accessgraph_core::catalog::{AuthStructureLoader, Catalog, StaticBackup};
use accessgraph_core::config::AccessGraphConfig;
use accessgraph_core::logging::init_logging;
use accessgraph_core::store::MemoryStore;
use anyhow::Context as _;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Loaded configuration and catalog shared by every command
pub struct Context {
    pub config: AccessGraphConfig,
    pub catalog: Catalog,
}

impl Context {
    pub fn new(config: AccessGraphConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    /// Load the config file (if present), start logging and read the catalog
    pub async fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config = AccessGraphConfig::load_from(config_path)?;
        config.validate()?;
        init_logging(&config.logging)?;

        let catalog = Catalog::from_dir(&config.catalog)
            .await
            .with_context(|| format!("Failed to read catalog from {}", config.catalog.backup_dir.display()))?;
        log::debug!(
            "Catalog loaded: {} groups, {} sections",
            catalog.groups.groups.len(),
            catalog.apps.app_groups.len()
        );

        Ok(Self::new(config, catalog))
    }

    /// A resolver over a private in-memory store seeded from the catalog
    pub fn resolver(&self) -> AccessResolver {
        let loader = AuthStructureLoader::new(StaticBackup::from(&self.catalog));
        AccessResolver::new(Arc::new(MemoryStore::new()), loader)
    }
}

pub fn group_set(groups: &[String]) -> BTreeSet<String> {
    groups.iter().map(|g| g.trim().to_string()).filter(|g| !g.is_empty()).collect()
}

fn join(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "(none)".to_string()
    } else {
        set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Context;
    use accessgraph_core::catalog::{
        AppCatalogDoc, AppDef, AppGroupDef, AppInstanceDef, Catalog, GroupDef, GroupInheritanceDoc,
    };
    use accessgraph_core::config::AccessGraphConfig;

    pub fn context() -> Context {
        let groups = GroupInheritanceDoc {
            groups: vec![
                GroupDef::new("superuser", &[]),
                GroupDef::new("leads", &["planners"]),
                GroupDef::new("planners", &["viewers"]),
                GroupDef::new("viewers", &[]),
                GroupDef::new("QSR_NORTH", &[]),
            ],
        };
        let apps = AppCatalogDoc {
            app_groups: vec![
                AppGroupDef {
                    name: "planning".to_string(),
                    apps: vec![AppDef {
                        name: "planner".to_string(),
                        instances: vec![
                            AppInstanceDef::new("planner", &["planners"]),
                            AppInstanceDef::new("planner_admin", &["planners", "leads"]),
                        ],
                    }],
                },
                AppGroupDef {
                    name: "pricing".to_string(),
                    apps: vec![AppDef {
                        name: "qsr_pricing".to_string(),
                        instances: vec![AppInstanceDef::new("qsr_pricing", &["QSR"])],
                    }],
                },
            ],
        };
        Context::new(AccessGraphConfig::default(), Catalog::new(groups, apps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accessgraph_core::config::CatalogConfig;

    #[test]
    fn test_group_set_trims_and_drops_empty() {
        let groups = group_set(&[" a".to_string(), "".to_string(), "b".to_string()]);
        assert_eq!(groups, BTreeSet::from(["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_load_reads_catalog_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_config = CatalogConfig { backup_dir: dir.path().to_path_buf(), ..Default::default() };
        let catalog = fixtures::context().catalog;
        std::fs::write(catalog_config.groups_path(), serde_json::to_string(&catalog.groups).unwrap()).unwrap();
        std::fs::write(catalog_config.apps_path(), serde_json::to_string(&catalog.apps).unwrap()).unwrap();

        let config_path = dir.path().join("accessgraph.toml");
        let backup_dir = dir.path().display().to_string().replace('\\', "/");
        std::fs::write(&config_path, format!("[catalog]\nbackup_dir = \"{backup_dir}\"\n")).unwrap();

        let ctx = Context::load(&config_path).await.unwrap();
        assert_eq!(ctx.catalog.groups, catalog.groups);
    }

    #[tokio::test]
    async fn test_load_without_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("accessgraph.toml");
        let backup_dir = dir.path().join("missing").display().to_string().replace('\\', "/");
        std::fs::write(&config_path, format!("[catalog]\nbackup_dir = \"{backup_dir}\"\n")).unwrap();

        let err = Context::load(&config_path).await.err().unwrap();
        assert!(format!("{err:#}").contains("Failed to read catalog"));
    }
}
