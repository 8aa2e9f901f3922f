//! Advisory checks over the authoring documents

use super::documents::{AppCatalogDoc, GroupInheritanceDoc};
use std::collections::BTreeSet;
use std::fmt;

/// A dangling or ambiguous reference in the catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Finding {
    /// A group declared more than once
    DuplicateGroup { group: String },
    /// An `inherits` entry naming an undeclared group
    UnknownInheritedGroup { group: String, child: String },
    /// A `requires` entry naming an undeclared group
    UnknownRequiredGroup { instance: String, group: String },
    /// An instance name used more than once across the catalog
    DuplicateInstance { instance: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::DuplicateGroup { group } => write!(f, "group '{}' is declared more than once", group),
            Finding::UnknownInheritedGroup { group, child } => {
                write!(f, "group '{}' inherits undeclared group '{}'", group, child)
            }
            Finding::UnknownRequiredGroup { instance, group } => {
                write!(f, "app instance '{}' requires undeclared group '{}'", instance, group)
            }
            Finding::DuplicateInstance { instance } => {
                write!(f, "app instance '{}' is declared more than once", instance)
            }
        }
    }
}

/// Check both documents for references the runtime would silently treat as misses
pub fn validate(groups: &GroupInheritanceDoc, apps: &AppCatalogDoc) -> Vec<Finding> {
    let mut findings = Vec::new();

    let mut declared = BTreeSet::new();
    for name in groups.group_names() {
        if !declared.insert(name) {
            findings.push(Finding::DuplicateGroup { group: name.to_string() });
        }
    }

    for group in &groups.groups {
        for child in &group.inherits {
            if !declared.contains(child.as_str()) {
                findings.push(Finding::UnknownInheritedGroup { group: group.name.clone(), child: child.clone() });
            }
        }
    }

    let mut seen_instances = BTreeSet::new();
    for (_, _, instance) in apps.instances() {
        if !seen_instances.insert(instance.name.as_str()) {
            findings.push(Finding::DuplicateInstance { instance: instance.name.clone() });
        }
        for group in &instance.requires {
            if !declared.contains(group.as_str()) {
                findings.push(Finding::UnknownRequiredGroup {
                    instance: instance.name.clone(),
                    group: group.clone(),
                });
            }
        }
    }

    findings.sort();
    findings.dedup();
    findings
}
