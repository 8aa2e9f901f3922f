//! Application access across the whole catalog

use super::evaluator::has_access;
use crate::catalog::AppsMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Accessible instances and their roll-up to apps and sections
///
/// Every app here owns at least one accessible instance, and every section
/// at least one accessible app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppAccess {
    #[serde(rename = "app_access")]
    pub instances: BTreeSet<String>,
    pub apps: BTreeSet<String>,
    #[serde(rename = "accordions")]
    pub sections: BTreeSet<String>,
}

impl AppAccess {
    pub fn can_open(&self, instance: &str) -> bool {
        self.instances.contains(instance)
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Evaluate every instance in `apps` against `effective_groups`
pub fn propagate_app_access(effective_groups: &BTreeSet<String>, apps: &AppsMap) -> AppAccess {
    let mut access = AppAccess::default();

    for (section, section_apps) in apps {
        for (app, instances) in section_apps {
            for (instance, requires) in instances {
                let requirements: BTreeSet<String> = requires.iter().cloned().collect();
                if has_access(effective_groups, &requirements) {
                    access.instances.insert(instance.clone());
                    access.apps.insert(app.clone());
                    access.sections.insert(section.clone());
                }
            }
        }
    }

    access
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_structure, set};

    #[test]
    fn test_rollup_is_consistent() {
        let apps = sample_structure().apps;
        for groups in [set(&["internal"]), set(&["forecast_users"]), set(&["portal_users", "QSR"]), set(&[])] {
            let access = propagate_app_access(&groups, &apps);

            for section in &access.sections {
                assert!(apps[section].keys().any(|app| access.apps.contains(app)));
            }
            for app in &access.apps {
                let owner = apps.values().find_map(|s| s.get(app)).unwrap();
                assert!(owner.keys().any(|inst| access.instances.contains(inst)));
            }
        }
    }

    #[test]
    fn test_partial_app_access() {
        let access = propagate_app_access(&set(&["forecast_users"]), &sample_structure().apps);
        assert_eq!(access.instances, set(&["volume_forecast"]));
        assert_eq!(access.apps, set(&["volume_forecast"]));
        assert_eq!(access.sections, set(&["standard_apps"]));
    }

    #[test]
    fn test_superuser_sees_everything() {
        let apps = sample_structure().apps;
        let access = propagate_app_access(&set(&["superuser"]), &apps);
        assert_eq!(access.instances.len(), 6);
        assert_eq!(access.sections.len(), 4);
    }

    #[test]
    fn test_dev_is_kept_out_of_superuser_apps() {
        let access = propagate_app_access(&set(&["dev"]), &sample_structure().apps);
        assert!(!access.can_open("auth_controller"));
        assert!(!access.sections.contains("admin"));
        assert!(access.can_open("slot_dc"));
    }

    #[test]
    fn test_no_groups_no_access() {
        let access = propagate_app_access(&set(&[]), &sample_structure().apps);
        assert!(access.is_empty());
        assert!(access.sections.is_empty());
    }
}
