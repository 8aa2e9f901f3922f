//! Access decisions for a single requirement set

use std::collections::BTreeSet;

/// Satisfies every requirement set
pub const SUPERUSER: &str = "superuser";
/// Satisfies every requirement set that does not itself require `superuser`
pub const DEV: &str = "dev";

/// Whether `effective_groups` satisfies `requirements`
///
/// True when the requirements are a subset of the effective groups, or
/// when the user holds an elevated group: `superuser` always, `dev` unless
/// `superuser` is one of the requirements. An empty requirement set is
/// always satisfied.
pub fn has_access(effective_groups: &BTreeSet<String>, requirements: &BTreeSet<String>) -> bool {
    if requirements.is_subset(effective_groups) {
        return true;
    }

    let superuser_gated = requirements.contains(SUPERUSER);
    effective_groups.contains(SUPERUSER) || (!superuser_gated && effective_groups.contains(DEV))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::set;

    #[test]
    fn test_superuser_bypasses_everything() {
        assert!(has_access(&set(&["superuser"]), &set(&["anything"])));
        assert!(has_access(&set(&["superuser"]), &set(&["superuser", "other"])));
    }

    #[test]
    fn test_dev_cannot_satisfy_superuser_gate() {
        assert!(!has_access(&set(&["dev"]), &set(&["superuser"])));
        assert!(!has_access(&set(&["dev", "x"]), &set(&["superuser", "x"])));
    }

    #[test]
    fn test_dev_bypasses_ordinary_requirements() {
        assert!(has_access(&set(&["dev"]), &set(&["other_group"])));
    }

    #[test]
    fn test_subset_rule() {
        assert!(has_access(&set(&["x", "y"]), &set(&["x", "y"])));
        assert!(has_access(&set(&["x", "y", "z"]), &set(&["x"])));
        assert!(!has_access(&set(&["x"]), &set(&["x", "y"])));
    }

    #[test]
    fn test_empty_sets() {
        assert!(has_access(&set(&[]), &set(&[])));
        assert!(!has_access(&set(&[]), &set(&["x"])));
    }
}
