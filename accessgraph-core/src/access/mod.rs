//! Group inheritance, access decisions and their propagation over the app catalog
//!
//! The pure functions here ([`propagate_inheritance_in`], [`has_access`],
//! [`propagate_app_access`]) take the auth structure as plain maps and are
//! shared by the store-backed [`AccessResolver`] and the admin graph.
//!
//! # Example
//!
//! ```
//! use accessgraph_core::access::{has_access, propagate_inheritance_in};
//! use accessgraph_core::catalog::InheritanceMap;
//! use std::collections::BTreeSet;
//!
//! let mut groups = InheritanceMap::new();
//! groups.insert("A".into(), vec!["B".into()]);
//! groups.insert("B".into(), vec!["A".into()]);
//!
//! let direct = BTreeSet::from(["A".to_string()]);
//! let inherited = propagate_inheritance_in(&direct, &groups, &InheritanceMap::new());
//! assert_eq!(inherited, BTreeSet::from(["B".to_string()]));
//!
//! assert!(has_access(&BTreeSet::from(["superuser".to_string()]), &BTreeSet::from(["B".to_string()])));
//! ```

mod evaluator;
mod inheritance;
pub mod predicates;
mod propagator;
mod resolver;

pub use evaluator::{has_access, DEV, SUPERUSER};
pub use inheritance::{effective_groups_in, propagate_inheritance_in, QSR_TAG};
pub use predicates::{
    access_check, external_access_only, internal_access_only, navigation_sections, read_only_access,
};
pub use propagator::{propagate_app_access, AppAccess};
pub use resolver::{AccessResolver, DerivedAccess};
