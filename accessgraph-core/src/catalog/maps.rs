//! Store-resident shapes of the auth structure
//!
//! Readers here never fail on shape: anything unexpected reads as empty
//! and is logged, so a malformed document behaves like a lookup miss.

use serde_json::Value;
use std::collections::BTreeMap;

/// Group → directly inherited children
pub type InheritanceMap = BTreeMap<String, Vec<String>>;

/// Section → app → instance → required groups
pub type AppsMap = BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>;

/// The three documents kept in the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthStructure {
    pub apps: AppsMap,
    pub user_groups: InheritanceMap,
    pub ad_groups: InheritanceMap,
}

impl AuthStructure {
    /// Read all three documents from raw JSON, tolerating missing or malformed parts
    pub fn from_documents(apps: Option<&Value>, user_groups: Option<&Value>, ad_groups: Option<&Value>) -> Self {
        Self {
            apps: apps.map(|v| parse_apps_map(v, "apps")).unwrap_or_default(),
            user_groups: user_groups.map(|v| parse_inheritance_map(v, "user_groups")).unwrap_or_default(),
            ad_groups: ad_groups.map(|v| parse_inheritance_map(v, "ad_groups")).unwrap_or_default(),
        }
    }

    /// Every instance name in the apps map
    pub fn instance_names(&self) -> impl Iterator<Item = &str> {
        self.apps.values().flat_map(|apps| apps.values()).flat_map(|insts| insts.keys().map(String::as_str))
    }
}

/// Parse a `{group: [children]}` document
pub fn parse_inheritance_map(value: &Value, label: &str) -> InheritanceMap {
    let Some(object) = value.as_object() else {
        log::warn!("Document '{}' is not an object; treating it as empty", label);
        return InheritanceMap::new();
    };

    object
        .iter()
        .map(|(group, children)| (group.clone(), string_list(children, label, group)))
        .collect()
}

/// Parse a `{section: {app: {instance: [requirements]}}}` document
pub fn parse_apps_map(value: &Value, label: &str) -> AppsMap {
    let Some(sections) = value.as_object() else {
        log::warn!("Document '{}' is not an object; treating it as empty", label);
        return AppsMap::new();
    };

    let mut map = AppsMap::new();
    for (section, apps) in sections {
        let Some(apps) = apps.as_object() else {
            log::warn!("Section '{}' in '{}' is not an object; skipping", section, label);
            continue;
        };
        let section_entry = map.entry(section.clone()).or_default();
        for (app, instances) in apps {
            let Some(instances) = instances.as_object() else {
                log::warn!("App '{}' in '{}' is not an object; skipping", app, label);
                continue;
            };
            let app_entry = section_entry.entry(app.clone()).or_default();
            for (instance, requires) in instances {
                app_entry.insert(instance.clone(), string_list(requires, label, instance));
            }
        }
    }
    map
}

fn string_list(value: &Value, label: &str, owner: &str) -> Vec<String> {
    match value.as_array() {
        Some(items) => items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        None => {
            log::warn!("Entry '{}' in '{}' is not a list; treating it as empty", owner, label);
            Vec::new()
        }
    }
}
