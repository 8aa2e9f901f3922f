//! Guarded population of the auth structure in the store
//!
//! The check-then-load sequence is not atomic: two cold callers may both
//! reload. Both write the same backup data, so the race only costs a
//! redundant fetch.

use super::backup::BackupSource;
use super::maps::AuthStructure;
use super::{CatalogError, AD_GROUPS_KEY, APPS_KEY, LOADED_FLAG_KEY, USER_GROUPS_KEY};
use crate::store::{SessionStore, StoreError, StoreResult};
use std::sync::Arc;

/// Loads the auth structure from a backup into the store once
#[derive(Clone)]
pub struct AuthStructureLoader {
    backup: Arc<dyn BackupSource>,
}

impl AuthStructureLoader {
    pub fn new(backup: impl BackupSource + 'static) -> Self {
        Self { backup: Arc::new(backup) }
    }

    pub fn from_arc(backup: Arc<dyn BackupSource>) -> Self {
        Self { backup }
    }

    /// Whether the `auth_struct_loaded` flag is set
    ///
    /// Anything but a positive integer counts as not loaded.
    pub async fn is_loaded<S: SessionStore + ?Sized>(store: &S) -> StoreResult<bool> {
        match store.get(LOADED_FLAG_KEY).await {
            Ok(Some(flag)) => Ok(flag.trim().parse::<i64>().map(|n| n > 0).unwrap_or(false)),
            Ok(None) => Ok(false),
            Err(StoreError::WrongType { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Load from backup unless the flag says the structure is present
    ///
    /// Returns true if a reload happened.
    pub async fn ensure_loaded<S: SessionStore + ?Sized>(&self, store: &S) -> Result<bool, CatalogError> {
        if Self::is_loaded(store).await? {
            return Ok(false);
        }
        self.load(store).await?;
        Ok(true)
    }

    /// Unconditionally fetch the backup and overwrite the store documents
    pub async fn load<S: SessionStore + ?Sized>(&self, store: &S) -> Result<(), CatalogError> {
        let structure = self.backup.fetch().await?;
        log::info!(
            "Loading auth structure from {} backup: {} groups, {} AD groups, {} app instances",
            self.backup.name(),
            structure.user_groups.len(),
            structure.ad_groups.len(),
            structure.instance_names().count()
        );

        store.json_set(APPS_KEY, serde_json::to_value(&structure.apps).map_err(StoreError::from)?).await?;
        store
            .json_set(USER_GROUPS_KEY, serde_json::to_value(&structure.user_groups).map_err(StoreError::from)?)
            .await?;
        store
            .json_set(AD_GROUPS_KEY, serde_json::to_value(&structure.ad_groups).map_err(StoreError::from)?)
            .await?;
        store.set(LOADED_FLAG_KEY, "1").await?;
        Ok(())
    }

    /// Clear the flag so the next `ensure_loaded` reloads
    pub async fn invalidate<S: SessionStore + ?Sized>(store: &S) -> StoreResult<()> {
        log::info!("Auth structure invalidated");
        store.set(LOADED_FLAG_KEY, "0").await
    }

    /// Fetch straight from the backup without touching the store
    pub async fn fetch_backup(&self) -> Result<AuthStructure, CatalogError> {
        self.backup.fetch().await
    }

    /// Ensure the structure is loaded, then read it back
    pub async fn read<S: SessionStore + ?Sized>(&self, store: &S) -> Result<AuthStructure, CatalogError> {
        self.ensure_loaded(store).await?;
        Ok(read_structure(store).await?)
    }
}

/// Read the three documents as currently stored, without loading
pub async fn read_structure<S: SessionStore + ?Sized>(store: &S) -> StoreResult<AuthStructure> {
    let apps = store.json_get(APPS_KEY).await?;
    let user_groups = store.json_get(USER_GROUPS_KEY).await?;
    let ad_groups = store.json_get(AD_GROUPS_KEY).await?;
    Ok(AuthStructure::from_documents(apps.as_ref(), user_groups.as_ref(), ad_groups.as_ref()))
}
