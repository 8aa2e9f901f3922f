//! Shared fixtures for unit tests

use crate::catalog::{
    AppCatalogDoc, AppDef, AppGroupDef, AppInstanceDef, AuthStructure, AuthStructureLoader, Catalog, GroupDef,
    GroupInheritanceDoc, InheritanceMap, StaticBackup,
};
use crate::store::{SessionStore, StoreError, StoreResult};
use serde_json::json;
use std::collections::BTreeSet;
use std::time::Duration;

pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn app(name: &str, instances: Vec<AppInstanceDef>) -> AppDef {
    AppDef { name: name.to_string(), instances }
}

/// A small catalog exercising chains, AD inheritance and the QSR tag
pub fn sample_catalog() -> Catalog {
    let groups = GroupInheritanceDoc {
        groups: vec![
            GroupDef::new("superuser", &[]),
            GroupDef::new("dev", &[]),
            GroupDef::new("admin_group", &["forecast_users", "portal_users"]),
            GroupDef::new("forecast_users", &["read_only"]),
            GroupDef::new("portal_users", &[]),
            GroupDef::new("read_only", &[]),
            GroupDef::new("internal", &["portal_users"]),
            GroupDef::new("external", &[]),
            GroupDef::new("QSR_EAST", &[]),
            GroupDef::new("QSR", &[]),
        ],
    };

    let apps = AppCatalogDoc {
        app_groups: vec![
            AppGroupDef {
                name: "standard_apps".to_string(),
                apps: vec![
                    app("slot_dc", vec![AppInstanceDef::new("slot_dc", &["internal"])]),
                    app(
                        "volume_forecast",
                        vec![
                            AppInstanceDef::new("volume_forecast", &["forecast_users"]),
                            AppInstanceDef::new("volume_forecast_admin", &["forecast_users", "admin_group"]),
                        ],
                    ),
                ],
            },
            AppGroupDef {
                name: "data_portals".to_string(),
                apps: vec![app("portal_kls", vec![AppInstanceDef::new("portal_kls", &["portal_users"])])],
            },
            AppGroupDef {
                name: "custom_apps".to_string(),
                apps: vec![app("qsr_pricing", vec![AppInstanceDef::new("qsr_pricing", &["QSR"])])],
            },
            AppGroupDef {
                name: "admin".to_string(),
                apps: vec![app("auth_controller", vec![AppInstanceDef::new("auth_controller", &["superuser"])])],
            },
        ],
    };

    let ad_groups = InheritanceMap::from([("AD_Analytics".to_string(), vec!["forecast_users".to_string()])]);

    Catalog::new(groups, apps).with_ad_groups(ad_groups)
}

/// The store form of [`sample_catalog`], written out by hand
pub fn sample_structure() -> AuthStructure {
    AuthStructure::from_documents(
        Some(&json!({
            "standard_apps": {
                "slot_dc": {"slot_dc": ["internal"]},
                "volume_forecast": {
                    "volume_forecast": ["forecast_users"],
                    "volume_forecast_admin": ["forecast_users", "admin_group"]
                }
            },
            "data_portals": {"portal_kls": {"portal_kls": ["portal_users"]}},
            "custom_apps": {"qsr_pricing": {"qsr_pricing": ["QSR"]}},
            "admin": {"auth_controller": {"auth_controller": ["superuser"]}}
        })),
        Some(&json!({
            "superuser": [],
            "dev": [],
            "admin_group": ["forecast_users", "portal_users"],
            "forecast_users": ["read_only"],
            "portal_users": [],
            "read_only": [],
            "internal": ["portal_users"],
            "external": [],
            "QSR_EAST": [],
            "QSR": []
        })),
        Some(&json!({"AD_Analytics": ["forecast_users"]})),
    )
}

pub fn sample_loader() -> AuthStructureLoader {
    AuthStructureLoader::new(StaticBackup::new(sample_structure()))
}

/// A store whose backend is always unreachable
pub struct UnavailableStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait::async_trait]
impl SessionStore for UnavailableStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        down()
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        down()
    }

    async fn delete(&self, _key: &str) -> StoreResult<bool> {
        down()
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> StoreResult<bool> {
        down()
    }

    async fn ttl(&self, _key: &str) -> StoreResult<Option<Duration>> {
        down()
    }

    async fn sadd(&self, _key: &str, _member: &str) -> StoreResult<bool> {
        down()
    }

    async fn srem(&self, _key: &str, _member: &str) -> StoreResult<bool> {
        down()
    }

    async fn smembers(&self, _key: &str) -> StoreResult<BTreeSet<String>> {
        down()
    }

    async fn json_get(&self, _key: &str) -> StoreResult<Option<serde_json::Value>> {
        down()
    }

    async fn json_set(&self, _key: &str, _value: serde_json::Value) -> StoreResult<()> {
        down()
    }

    async fn exists(&self, _key: &str) -> StoreResult<bool> {
        down()
    }

    async fn purge_expired(&self) -> StoreResult<usize> {
        down()
    }
}
