//! Store keys of a user identity

/// The keys one identity occupies in the store
///
/// `validity`, `username_index`, `username`, `first_name` and `groups` form
/// the lifecycle set; `access` caches the derived snapshot and follows the
/// same TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    /// `<uid>` → "1" while the identity is valid
    pub validity: String,
    /// `<username>` → uid
    pub username_index: String,
    /// `<uid>_username`
    pub username: String,
    /// `<uid>_first_name`
    pub first_name: String,
    /// `<uid>_groups`, a set of direct groups
    pub groups: String,
    /// `<uid>_access`, the derived snapshot
    pub access: String,
}

impl SessionKeys {
    pub fn new(uid: &str, username: &str) -> Self {
        Self {
            validity: uid.to_string(),
            username_index: username.to_string(),
            username: format!("{uid}_username"),
            first_name: format!("{uid}_first_name"),
            groups: format!("{uid}_groups"),
            access: format!("{uid}_access"),
        }
    }

    /// Keys readable from the uid alone
    pub fn by_uid(uid: &str) -> UidKeys {
        UidKeys {
            validity: uid.to_string(),
            username: format!("{uid}_username"),
            first_name: format!("{uid}_first_name"),
            groups: format!("{uid}_groups"),
            access: format!("{uid}_access"),
        }
    }

    /// Every key, refreshed and deleted as one batch
    pub fn all(&self) -> [&str; 6] {
        [&self.validity, &self.username_index, &self.username, &self.first_name, &self.groups, &self.access]
    }

    /// The keys derived from the uid
    ///
    /// `username_index` is left out: a newer login under the same username
    /// rebinds it to another uid.
    pub fn owned(&self) -> [&str; 5] {
        [&self.validity, &self.username, &self.first_name, &self.groups, &self.access]
    }
}

/// The uid-derived subset of [`SessionKeys`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UidKeys {
    pub validity: String,
    pub username: String,
    pub first_name: String,
    pub groups: String,
    pub access: String,
}

impl UidKeys {
    pub fn with_username(self, username: &str) -> SessionKeys {
        SessionKeys {
            validity: self.validity,
            username_index: username.to_string(),
            username: self.username,
            first_name: self.first_name,
            groups: self.groups,
            access: self.access,
        }
    }
}
