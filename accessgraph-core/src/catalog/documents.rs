//! Authoring documents for groups and applications

use super::maps::{AppsMap, InheritanceMap};
use serde::{Deserialize, Serialize};

/// `{groups: [{name, inherits: [names]}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInheritanceDoc {
    #[serde(default)]
    pub groups: Vec<GroupDef>,
}

/// A group and the groups its members inherit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    pub name: String,
    #[serde(default)]
    pub inherits: Vec<String>,
}

impl GroupDef {
    pub fn new(name: impl Into<String>, inherits: &[&str]) -> Self {
        Self { name: name.into(), inherits: inherits.iter().map(|s| s.to_string()).collect() }
    }
}

impl GroupInheritanceDoc {
    /// Group → children map as stored under `user_groups`
    ///
    /// A group declared twice keeps the union of its children, in declaration order.
    pub fn to_inheritance_map(&self) -> InheritanceMap {
        let mut map = InheritanceMap::new();
        for group in &self.groups {
            let children = map.entry(group.name.clone()).or_default();
            for child in &group.inherits {
                if !children.contains(child) {
                    children.push(child.clone());
                }
            }
        }
        map
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }
}

/// `{app_groups: [{name, apps: [{name, instances: [{name, requires}]}]}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCatalogDoc {
    #[serde(default)]
    pub app_groups: Vec<AppGroupDef>,
}

/// A navigation section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppGroupDef {
    pub name: String,
    #[serde(default)]
    pub apps: Vec<AppDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDef {
    pub name: String,
    #[serde(default)]
    pub instances: Vec<AppInstanceDef>,
}

/// The finest-grained accessible unit, gated by `requires`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInstanceDef {
    pub name: String,
    #[serde(default)]
    pub requires: Vec<String>,
}

impl AppInstanceDef {
    pub fn new(name: impl Into<String>, requires: &[&str]) -> Self {
        Self { name: name.into(), requires: requires.iter().map(|s| s.to_string()).collect() }
    }
}

impl AppCatalogDoc {
    /// Section → app → instance → requirements, as stored under `apps`
    pub fn to_apps_map(&self) -> AppsMap {
        let mut map = AppsMap::new();
        for section in &self.app_groups {
            let apps = map.entry(section.name.clone()).or_default();
            for app in &section.apps {
                let instances = apps.entry(app.name.clone()).or_default();
                for instance in &app.instances {
                    instances.insert(instance.name.clone(), instance.requires.clone());
                }
            }
        }
        map
    }

    /// Every instance with its owning app and section
    pub fn instances(&self) -> impl Iterator<Item = (&AppGroupDef, &AppDef, &AppInstanceDef)> {
        self.app_groups.iter().flat_map(|section| {
            section
                .apps
                .iter()
                .flat_map(move |app| app.instances.iter().map(move |inst| (section, app, inst)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_document() {
        let doc: GroupInheritanceDoc = serde_json::from_str(
            r#"{"groups": [{"name": "A", "inherits": ["B"]}, {"name": "B", "inherits": []}, {"name": "C"}]}"#,
        )
        .unwrap();

        let map = doc.to_inheritance_map();
        assert_eq!(map["A"], vec!["B".to_string()]);
        assert!(map["B"].is_empty());
        assert!(map["C"].is_empty());
    }

    #[test]
    fn test_duplicate_group_declarations_merge() {
        let doc = GroupInheritanceDoc {
            groups: vec![GroupDef::new("A", &["B"]), GroupDef::new("A", &["C", "B"])],
        };
        assert_eq!(doc.to_inheritance_map()["A"], vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_apps_map_shape() {
        let doc: AppCatalogDoc = serde_json::from_str(
            r#"{"app_groups": [{"name": "standard_apps", "apps": [
                {"name": "slot_dc", "instances": [{"name": "slot_dc", "requires": ["internal"]}]},
                {"name": "volume_forecast", "instances": [
                    {"name": "volume_forecast", "requires": ["forecast"]},
                    {"name": "volume_forecast_admin", "requires": ["forecast", "admin"]}
                ]}
            ]}]}"#,
        )
        .unwrap();

        let map = doc.to_apps_map();
        assert_eq!(map["standard_apps"]["slot_dc"]["slot_dc"], vec!["internal".to_string()]);
        assert_eq!(map["standard_apps"]["volume_forecast"].len(), 2);
        assert_eq!(doc.instances().count(), 3);
    }
}
