//! Group membership administration
//!
//! Edits go to the directory first; whatever actually changed there is
//! then mirrored into the user's live identity, if any.

use super::directory::GroupDirectory;
use super::graph::AccessGraph;
use crate::catalog::Catalog;
use crate::identity::IdentityManager;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Added,
    Removed,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAction::Added => write!(f, "added"),
            ChangeAction::Removed => write!(f, "removed"),
        }
    }
}

/// A user-facing summary of a membership change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub success: bool,
}

/// Outcome of [`AdminController::add_groups`] / [`AdminController::remove_groups`]
#[derive(Debug, Clone, Serialize)]
pub struct GroupChangeReport {
    pub action: ChangeAction,
    /// Groups whose membership actually changed at the directory
    pub changed: BTreeSet<String>,
    /// Groups the directory refused, with the reason
    pub failed: BTreeMap<String, String>,
    pub graph: AccessGraph,
}

impl GroupChangeReport {
    pub fn notification(&self) -> Notification {
        let title = format!("Groups {}", self.action);
        if self.changed.is_empty() {
            return Notification { title, message: format!("No groups {}!", self.action), success: false };
        }

        let names: Vec<&str> = self.changed.iter().map(String::as_str).collect();
        let mut message = format!("Groups {}: {}", self.action, names.join(", "));
        if !self.failed.is_empty() {
            let failed: Vec<&str> = self.failed.keys().map(String::as_str).collect();
            message.push_str(&format!(" (failed: {})", failed.join(", ")));
        }
        Notification { title, message, success: self.failed.is_empty() }
    }
}

/// Reads and edits group membership, then renders the result
#[derive(Clone)]
pub struct AdminController {
    directory: Arc<dyn GroupDirectory>,
    catalog: Arc<Catalog>,
    identities: IdentityManager,
}

impl AdminController {
    pub fn new(directory: Arc<dyn GroupDirectory>, catalog: Arc<Catalog>, identities: IdentityManager) -> Self {
        Self { directory, catalog, identities }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The access graph of `username` as the directory currently sees them
    pub async fn build_graph(&self, username: &str) -> AccessGraph {
        let groups = self.user_groups(username).await;
        let directory_groups = match self.directory.list_all_groups().await {
            Ok(groups) => groups,
            Err(e) => {
                log::warn!("Failed to list {} directory groups: {}", self.directory.name(), e);
                BTreeMap::new()
            }
        };
        AccessGraph::build(&self.catalog, &groups, &directory_groups)
    }

    /// Add `username` to every selected group they are not already in
    pub async fn add_groups(&self, username: &str, selected: &BTreeSet<String>) -> GroupChangeReport {
        let before = self.user_groups(username).await;
        let mut failed = BTreeMap::new();

        for group in selected.difference(&before) {
            if let Err(e) = self.directory.add_user_to_group(username, group).await {
                log::warn!("Failed to add {} to {}: {}", username, group, e);
                failed.insert(group.clone(), e.to_string());
            }
        }

        let after = self.user_groups(username).await;
        let changed: BTreeSet<String> = after.difference(&before).cloned().collect();
        if !changed.is_empty() {
            if let Err(e) = self.identities.inject_groups(username, &changed).await {
                log::error!("Failed to push added groups of {} to the store: {}", username, e);
            }
        }

        self.report(username, ChangeAction::Added, changed, failed).await
    }

    /// Remove `username` from every selected group they are in
    pub async fn remove_groups(&self, username: &str, selected: &BTreeSet<String>) -> GroupChangeReport {
        let before = self.user_groups(username).await;
        let mut failed = BTreeMap::new();

        for group in selected.intersection(&before) {
            if let Err(e) = self.directory.remove_user_from_group(username, group).await {
                log::warn!("Failed to remove {} from {}: {}", username, group, e);
                failed.insert(group.clone(), e.to_string());
            }
        }

        let after = self.user_groups(username).await;
        let changed: BTreeSet<String> = before.difference(&after).cloned().collect();
        if !changed.is_empty() {
            if let Err(e) = self.identities.deject_groups(username, &changed).await {
                log::error!("Failed to push removed groups of {} to the store: {}", username, e);
            }
        }

        self.report(username, ChangeAction::Removed, changed, failed).await
    }

    async fn report(
        &self,
        username: &str,
        action: ChangeAction,
        changed: BTreeSet<String>,
        failed: BTreeMap<String, String>,
    ) -> GroupChangeReport {
        log::info!("Groups {} for {}: {:?} ({} failed)", action, username, changed, failed.len());
        let graph = self.build_graph(username).await;
        GroupChangeReport { action, changed, failed, graph }
    }

    async fn user_groups(&self, username: &str) -> BTreeSet<String> {
        match self.directory.list_groups_for_user(username).await {
            Ok(groups) => groups,
            Err(e) => {
                log::warn!("Failed to list {} groups of {}: {}", self.directory.name(), username, e);
                BTreeSet::new()
            }
        }
    }
}
