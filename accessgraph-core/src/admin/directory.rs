//! Identity-provider group directory
//!
//! The admin surface edits group membership at the provider and reads the
//! provider's group list to flag catalog groups it does not know.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

/// Errors from a group directory
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),
    #[error("Unknown group '{0}'")]
    UnknownGroup(String),
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

/// A user as listed by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub username: String,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub enabled: bool,
}

impl DirectoryUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), first_name: None, email: None, enabled: true }
    }
}

/// Group membership at the identity provider
///
/// Implement this trait to plug in a real provider.
#[async_trait::async_trait]
pub trait GroupDirectory: Send + Sync {
    async fn list_groups_for_user(&self, username: &str) -> Result<BTreeSet<String>, DirectoryError>;

    async fn add_user_to_group(&self, username: &str, group: &str) -> Result<(), DirectoryError>;

    async fn remove_user_from_group(&self, username: &str, group: &str) -> Result<(), DirectoryError>;

    /// Every group the provider knows, with its description
    async fn list_all_groups(&self) -> Result<BTreeMap<String, String>, DirectoryError>;

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

#[derive(Debug, Default)]
struct DirectoryState {
    groups: BTreeMap<String, String>,
    users: BTreeMap<String, DirectoryUser>,
    memberships: BTreeMap<String, BTreeSet<String>>,
}

/// In-memory directory for tests and the CLI
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a group
    pub fn with_group(self, name: &str, description: &str) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.groups.insert(name.to_string(), description.to_string());
        }
        self
    }

    /// Declare a user with initial memberships; groups are declared as needed
    pub fn with_user(self, user: DirectoryUser, groups: &[&str]) -> Self {
        if let Ok(mut state) = self.state.write() {
            for group in groups {
                state.groups.entry(group.to_string()).or_default();
            }
            state.memberships.insert(user.username.clone(), groups.iter().map(|g| g.to_string()).collect());
            state.users.insert(user.username.clone(), user);
        }
        self
    }

    fn poisoned() -> DirectoryError {
        DirectoryError::Unavailable("memory directory lock poisoned".to_string())
    }

    fn check(state: &DirectoryState, username: &str, group: &str) -> Result<(), DirectoryError> {
        if !state.users.contains_key(username) {
            return Err(DirectoryError::UnknownUser(username.to_string()));
        }
        if !state.groups.contains_key(group) {
            return Err(DirectoryError::UnknownGroup(group.to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GroupDirectory for MemoryDirectory {
    async fn list_groups_for_user(&self, username: &str) -> Result<BTreeSet<String>, DirectoryError> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        state.memberships.get(username).cloned().ok_or_else(|| DirectoryError::UnknownUser(username.to_string()))
    }

    async fn add_user_to_group(&self, username: &str, group: &str) -> Result<(), DirectoryError> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        Self::check(&state, username, group)?;
        state.memberships.entry(username.to_string()).or_default().insert(group.to_string());
        Ok(())
    }

    async fn remove_user_from_group(&self, username: &str, group: &str) -> Result<(), DirectoryError> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        Self::check(&state, username, group)?;
        if let Some(groups) = state.memberships.get_mut(username) {
            groups.remove(group);
        }
        Ok(())
    }

    async fn list_all_groups(&self) -> Result<BTreeMap<String, String>, DirectoryError> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        Ok(state.groups.clone())
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, DirectoryError> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        Ok(state.users.values().cloned().collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
