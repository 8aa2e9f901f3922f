//! Store-backed resolution
//!
//! Every call ensures the auth structure is loaded and reads it fresh from
//! the store, so a reload is picked up by the next resolution.

use super::inheritance::propagate_inheritance_in;
use super::propagator::{propagate_app_access, AppAccess};
use crate::catalog::{AuthStructure, AuthStructureLoader, CatalogError};
use crate::store::SessionStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Everything derived from a user's direct groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAccess {
    pub inherited_groups: BTreeSet<String>,
    #[serde(flatten)]
    pub access: AppAccess,
}

impl DerivedAccess {
    /// Resolve inheritance and app access against an already-read structure
    pub fn compute(direct_groups: &BTreeSet<String>, structure: &AuthStructure) -> Self {
        let inherited_groups = propagate_inheritance_in(direct_groups, &structure.user_groups, &structure.ad_groups);
        let effective: BTreeSet<String> = direct_groups.union(&inherited_groups).cloned().collect();
        let access = propagate_app_access(&effective, &structure.apps);
        Self { inherited_groups, access }
    }
}

/// Resolves groups and app access against the structure held in a store
#[derive(Clone)]
pub struct AccessResolver {
    store: Arc<dyn SessionStore>,
    loader: AuthStructureLoader,
}

impl AccessResolver {
    pub fn new(store: Arc<dyn SessionStore>, loader: AuthStructureLoader) -> Self {
        Self { store, loader }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn loader(&self) -> &AuthStructureLoader {
        &self.loader
    }

    /// The current structure, loading it first if the flag is unset
    pub async fn structure(&self) -> Result<AuthStructure, CatalogError> {
        self.loader.read(self.store.as_ref()).await
    }

    /// Groups inherited from `groups`, excluding the groups themselves
    pub async fn propagate_inheritance(&self, groups: &BTreeSet<String>) -> Result<BTreeSet<String>, CatalogError> {
        let structure = self.structure().await?;
        Ok(propagate_inheritance_in(groups, &structure.user_groups, &structure.ad_groups))
    }

    /// `groups ∪ inherited`
    pub async fn effective_groups(&self, groups: &BTreeSet<String>) -> Result<BTreeSet<String>, CatalogError> {
        let mut effective = self.propagate_inheritance(groups).await?;
        effective.extend(groups.iter().cloned());
        Ok(effective)
    }

    /// App access for an already effective group set
    pub async fn propagate_app_access(&self, effective_groups: &BTreeSet<String>) -> Result<AppAccess, CatalogError> {
        let structure = self.structure().await?;
        Ok(propagate_app_access(effective_groups, &structure.apps))
    }

    /// Inheritance and app access in one read of the structure
    pub async fn enrich(&self, direct_groups: &BTreeSet<String>) -> Result<DerivedAccess, CatalogError> {
        let structure = self.structure().await?;
        let derived = DerivedAccess::compute(direct_groups, &structure);
        log::debug!(
            "Resolved {} direct groups to {} inherited, {} instances",
            direct_groups.len(),
            derived.inherited_groups.len(),
            derived.access.instances.len()
        );
        Ok(derived)
    }
}
