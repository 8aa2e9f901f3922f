//! The identity value handed to request handlers

use crate::access::{AppAccess, DerivedAccess};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// First name shown when the provider did not supply one
pub const MISSING_NAME: &str = "Missing Name!";
/// Group given to users whose username ends with the internal domain
pub const INTERNAL_GROUP: &str = "internal";
/// Group given to every other user
pub const EXTERNAL_GROUP: &str = "external";
/// Uid of the built-in dev identity
pub const DEV_UID: &str = "111";

/// Who is making a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated(UserIdentity),
}

impl Identity {
    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}

impl From<UserIdentity> for Identity {
    fn from(user: UserIdentity) -> Self {
        Identity::Authenticated(user)
    }
}

/// An authenticated user and the access derived from their groups
///
/// `inherited_groups` and `access` are a snapshot taken at login or at the
/// last [`reenrich`](super::IdentityManager::reenrich); later changes to
/// the stored direct groups do not show up here until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    pub username: String,
    pub first_name: String,
    /// Direct groups: provider groups plus `internal`/`external`
    pub groups: BTreeSet<String>,
    pub inherited_groups: BTreeSet<String>,
    pub access: AppAccess,
    /// Set only on the built-in local-mode identity
    #[serde(default)]
    pub dev: bool,
}

impl UserIdentity {
    pub fn new(uid: impl Into<String>, username: impl Into<String>, first_name: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            username: username.into(),
            first_name: first_name.filter(|n| !n.trim().is_empty()).unwrap_or(MISSING_NAME).to_string(),
            groups: BTreeSet::new(),
            inherited_groups: BTreeSet::new(),
            access: AppAccess::default(),
            dev: false,
        }
    }

    pub fn with_groups(mut self, groups: BTreeSet<String>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_derived(mut self, derived: DerivedAccess) -> Self {
        self.inherited_groups = derived.inherited_groups;
        self.access = derived.access;
        self
    }

    /// The built-in identity served in local mode
    pub fn dev(username: &str, derived: DerivedAccess) -> Self {
        let mut user = Self::new(DEV_UID, username, Some("dev"))
            .with_groups(BTreeSet::from([crate::access::SUPERUSER.to_string()]))
            .with_derived(derived);
        user.dev = true;
        user
    }

    pub fn derived(&self) -> DerivedAccess {
        DerivedAccess { inherited_groups: self.inherited_groups.clone(), access: self.access.clone() }
    }

    /// `groups ∪ inherited_groups`
    pub fn effective_groups(&self) -> BTreeSet<String> {
        self.groups.union(&self.inherited_groups).cloned().collect()
    }

    pub fn holds(&self, group: &str) -> bool {
        self.groups.contains(group) || self.inherited_groups.contains(group)
    }
}

/// `internal` if `username` ends with `internal_domain` (ignoring case), `external` otherwise
pub fn domain_group(username: &str, internal_domain: &str) -> &'static str {
    if username.to_lowercase().ends_with(&internal_domain.to_lowercase()) {
        INTERNAL_GROUP
    } else {
        EXTERNAL_GROUP
    }
}

/// Provider groups plus the domain group
pub fn direct_groups<I, G>(username: &str, provider_groups: I, internal_domain: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = G>,
    G: Into<String>,
{
    let mut groups: BTreeSet<String> = provider_groups.into_iter().map(Into::into).collect();
    groups.insert(domain_group(username, internal_domain).to_string());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::set;

    #[test]
    fn test_missing_first_name() {
        assert_eq!(UserIdentity::new("1", "a", None).first_name, MISSING_NAME);
        assert_eq!(UserIdentity::new("1", "a", Some("  ")).first_name, MISSING_NAME);
        assert_eq!(UserIdentity::new("1", "a", Some("Jane")).first_name, "Jane");
    }

    #[test]
    fn test_domain_group() {
        assert_eq!(domain_group("jane@kencogroup.com", "@kencogroup.com"), INTERNAL_GROUP);
        assert_eq!(domain_group("Jane@KencoGroup.com", "@kencogroup.com"), INTERNAL_GROUP);
        assert_eq!(domain_group("bob@client.com", "@kencogroup.com"), EXTERNAL_GROUP);
        assert_eq!(domain_group("kencogroup.com@evil.com", "@kencogroup.com"), EXTERNAL_GROUP);
    }

    #[test]
    fn test_direct_groups_include_domain_group() {
        let groups = direct_groups("bob@client.com", ["portal_users"], "@kencogroup.com");
        assert_eq!(groups, set(&["external", "portal_users"]));
    }

    #[test]
    fn test_dev_identity() {
        let dev = UserIdentity::dev("Dev", DerivedAccess::default());
        assert_eq!(dev.uid, DEV_UID);
        assert_eq!(dev.groups, set(&["superuser"]));
        assert!(dev.dev);
        assert!(Identity::from(dev).is_authenticated());
    }

    #[test]
    fn test_effective_groups() {
        let user = UserIdentity::new("1", "a", None).with_groups(set(&["A"])).with_derived(DerivedAccess {
            inherited_groups: set(&["B"]),
            access: AppAccess::default(),
        });
        assert_eq!(user.effective_groups(), set(&["A", "B"]));
        assert!(user.holds("B"));
        assert!(!user.holds("C"));
    }
}
