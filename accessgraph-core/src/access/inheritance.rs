//! Transitive group inheritance

use crate::catalog::InheritanceMap;
use std::collections::{BTreeSet, VecDeque};

/// Tag added to the inherited set whenever any held group name contains it
pub const QSR_TAG: &str = "QSR";

/// Compute every group inherited from `groups`
///
/// Children are looked up in both maps; unknown groups simply have no
/// children. The walk is breadth-first with a visited set seeded with the
/// starting groups, so cycles terminate and the starting groups never
/// appear in the result (except for the [`QSR_TAG`] rule below).
///
/// After the closure, if any direct or inherited group name contains
/// `"QSR"`, the literal `"QSR"` is added.
pub fn propagate_inheritance_in(
    groups: &BTreeSet<String>,
    user_groups: &InheritanceMap,
    ad_groups: &InheritanceMap,
) -> BTreeSet<String> {
    let mut seen: BTreeSet<&str> = groups.iter().map(String::as_str).collect();
    let mut inherited = BTreeSet::new();
    let mut frontier: VecDeque<&str> = groups.iter().map(String::as_str).collect();

    while let Some(group) = frontier.pop_front() {
        let children = user_groups.get(group).into_iter().chain(ad_groups.get(group)).flatten();
        for child in children {
            if seen.insert(child.as_str()) {
                inherited.insert(child.clone());
                frontier.push_back(child.as_str());
            }
        }
    }

    if groups.iter().chain(inherited.iter()).any(|g| g.contains(QSR_TAG)) {
        inherited.insert(QSR_TAG.to_string());
    }

    inherited
}

/// `groups ∪ inherited`, the set access decisions are made against
pub fn effective_groups_in(
    groups: &BTreeSet<String>,
    user_groups: &InheritanceMap,
    ad_groups: &InheritanceMap,
) -> BTreeSet<String> {
    let mut effective = propagate_inheritance_in(groups, user_groups, ad_groups);
    effective.extend(groups.iter().cloned());
    effective
}
