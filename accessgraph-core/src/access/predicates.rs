//! Yes/no questions the navigation layer asks about an identity
//!
//! All predicates read the identity's snapshot; none of them touch the
//! store.

use super::evaluator::{DEV, SUPERUSER};
use crate::identity::{Identity, EXTERNAL_GROUP, INTERNAL_GROUP};
use std::collections::BTreeSet;

/// Group that marks a read-only user
pub const READ_ONLY_GROUP: &str = "read_only";
/// Navigation section shown to superusers only
pub const CONTROL_TOWER: &str = "control_tower";

/// Whether `identity` may open app instance `instance`
pub fn access_check(identity: &Identity, instance: &str) -> bool {
    match identity {
        Identity::Anonymous => false,
        Identity::Authenticated(user) => user.dev || user.access.can_open(instance),
    }
}

pub fn read_only_access(identity: &Identity) -> bool {
    identity.user().is_some_and(|user| user.holds(READ_ONLY_GROUP))
}

/// Content reserved for internal users
pub fn internal_access_only(identity: &Identity) -> bool {
    specific_access_only(identity, INTERNAL_GROUP)
}

/// Content reserved for external users
pub fn external_access_only(identity: &Identity) -> bool {
    specific_access_only(identity, EXTERNAL_GROUP)
}

fn specific_access_only(identity: &Identity, group: &str) -> bool {
    let Some(user) = identity.user() else {
        return false;
    };
    user.dev || [group, SUPERUSER, DEV].iter().any(|g| user.holds(g))
}

/// Sections to render in the navigation menu
///
/// `control_tower` is added for `superuser`, held directly or inherited.
pub fn navigation_sections(identity: &Identity) -> BTreeSet<String> {
    let Some(user) = identity.user() else {
        return BTreeSet::new();
    };

    let mut sections = user.access.sections.clone();
    if user.holds(SUPERUSER) {
        sections.insert(CONTROL_TOWER.to_string());
    }
    sections
}
