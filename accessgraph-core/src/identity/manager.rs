//! Identity lifecycle in the store
//!
//! Login writes the identity keys, every successful load slides their TTL,
//! and logout deletes them. Direct groups may be mutated in place by the
//! admin surface; the derived snapshot under `<uid>_access` is only
//! recomputed at login or on [`IdentityManager::reenrich`].

use super::keys::SessionKeys;
use super::record::{direct_groups, Identity, UserIdentity};
use crate::access::{AccessResolver, DerivedAccess, SUPERUSER};
use crate::catalog::AuthStructureLoader;
use crate::config::AccessGraphConfig;
use crate::store::{SessionStore, StoreError};
use crate::Result;
use futures::future::try_join_all;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Creates, loads, refreshes and removes identities
#[derive(Clone)]
pub struct IdentityManager {
    store: Arc<dyn SessionStore>,
    resolver: AccessResolver,
    ttl: Duration,
    internal_domain: String,
    local_mode: bool,
    dev_username: String,
}

impl IdentityManager {
    pub fn new(store: Arc<dyn SessionStore>, loader: AuthStructureLoader) -> Self {
        Self::from_config(store, loader, &AccessGraphConfig::default())
    }

    pub fn from_config(store: Arc<dyn SessionStore>, loader: AuthStructureLoader, config: &AccessGraphConfig) -> Self {
        Self {
            resolver: AccessResolver::new(store.clone(), loader),
            store,
            ttl: config.sessions.ttl(),
            internal_domain: config.access.internal_domain.clone(),
            local_mode: config.access.local_mode,
            dev_username: config.access.dev_username.clone(),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_local_mode(mut self, enabled: bool) -> Self {
        self.local_mode = enabled;
        self
    }

    pub fn with_internal_domain(mut self, domain: impl Into<String>) -> Self {
        self.internal_domain = domain.into();
        self
    }

    pub fn resolver(&self) -> &AccessResolver {
        &self.resolver
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_local_mode(&self) -> bool {
        self.local_mode
    }

    /// Record a freshly authenticated user
    ///
    /// The domain group is added to the provider groups, inheritance and app
    /// access are resolved once, and all keys are written with a fresh TTL.
    /// In local mode nothing is written and the dev identity is returned.
    pub async fn login<I, G>(
        &self,
        uid: &str,
        username: &str,
        first_name: Option<&str>,
        provider_groups: I,
    ) -> Result<UserIdentity>
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        if self.local_mode {
            return Ok(self.dev_identity().await);
        }

        let groups = direct_groups(username, provider_groups, &self.internal_domain);
        let derived = self.resolver.enrich(&groups).await?;
        let user = UserIdentity::new(uid, username, first_name).with_groups(groups).with_derived(derived);

        self.write(&user).await?;
        log::info!(
            "Identity {} ({}) logged in: {} direct groups, {} instances",
            user.uid,
            user.username,
            user.groups.len(),
            user.access.instances.len()
        );
        Ok(user)
    }

    /// Resolve a uid to an identity, sliding its TTL on success
    ///
    /// Unknown or expired uids are anonymous. Store failures are logged and
    /// also read as anonymous.
    pub async fn load(&self, uid: &str) -> Identity {
        if self.local_mode {
            return self.dev_identity().await.into();
        }

        match self.try_load(uid).await {
            Ok(Some(user)) => Identity::Authenticated(user),
            Ok(None) => Identity::Anonymous,
            Err(e) => {
                log::error!("Failed to load identity {}: {}", uid, e);
                Identity::Anonymous
            }
        }
    }

    /// Like [`load`](Self::load) but surfaces store errors
    pub async fn try_load(&self, uid: &str) -> Result<Option<UserIdentity>> {
        let Some((keys, user)) = self.read(uid).await? else {
            return Ok(None);
        };
        self.refresh_keys(&keys).await?;
        Ok(Some(user))
    }

    /// Reset the TTL on every key of `user`
    ///
    /// Returns false if some keys had already disappeared.
    pub async fn refresh(&self, user: &UserIdentity) -> Result<bool> {
        if user.dev {
            return Ok(true);
        }
        self.refresh_keys(&SessionKeys::new(&user.uid, &user.username)).await
    }

    /// Delete every key of `user`, returning how many existed
    ///
    /// The username index survives when a newer login has rebound it.
    pub async fn logout(&self, user: &UserIdentity) -> Result<usize> {
        if user.dev {
            return Ok(0);
        }

        let keys = SessionKeys::new(&user.uid, &user.username);
        let mut doomed = keys.owned().to_vec();
        if self.owns_index(&keys).await? {
            doomed.push(&keys.username_index);
        }
        let deleted = try_join_all(doomed.into_iter().map(|key| self.store.delete(key))).await?;
        let count = deleted.into_iter().filter(|d| *d).count();
        log::info!("Identity {} ({}) logged out, {} keys removed", user.uid, user.username, count);
        Ok(count)
    }

    /// The uid currently bound to `username`, if any
    pub async fn session_uid(&self, username: &str) -> Result<Option<String>> {
        Ok(self.store.get(username).await?)
    }

    /// Direct groups as currently stored
    pub async fn stored_groups(&self, uid: &str) -> Result<BTreeSet<String>> {
        Ok(self.store.smembers(&SessionKeys::by_uid(uid).groups).await?)
    }

    /// Add groups to a logged-in user's stored direct groups
    ///
    /// No-op when the user has no live session. The derived snapshot is
    /// left alone. Returns the number of groups actually added.
    pub async fn inject_groups(&self, username: &str, groups: &BTreeSet<String>) -> Result<usize> {
        let Some(uid) = self.session_uid(username).await? else {
            log::debug!("No live session for {}; skipping group injection", username);
            return Ok(0);
        };

        let key = SessionKeys::by_uid(&uid).groups;
        let mut added = 0;
        for group in groups {
            if self.store.sadd(&key, group).await? {
                added += 1;
            }
        }
        self.align_ttl(&uid, &key).await?;

        log::info!("Injected {} groups into identity {} ({})", added, uid, username);
        Ok(added)
    }

    /// Remove groups from a logged-in user's stored direct groups
    ///
    /// Same contract as [`inject_groups`](Self::inject_groups).
    pub async fn deject_groups(&self, username: &str, groups: &BTreeSet<String>) -> Result<usize> {
        let Some(uid) = self.session_uid(username).await? else {
            log::debug!("No live session for {}; skipping group removal", username);
            return Ok(0);
        };

        let key = SessionKeys::by_uid(&uid).groups;
        let mut removed = 0;
        for group in groups {
            if self.store.srem(&key, group).await? {
                removed += 1;
            }
        }

        log::info!("Removed {} groups from identity {} ({})", removed, uid, username);
        Ok(removed)
    }

    /// Recompute the derived snapshot from the stored direct groups
    pub async fn reenrich(&self, uid: &str) -> Result<Option<UserIdentity>> {
        let Some((keys, user)) = self.read(uid).await? else {
            return Ok(None);
        };

        let derived = self.snapshot(&keys, &user.groups).await?;
        self.refresh_keys(&keys).await?;
        log::info!("Re-enriched identity {} ({})", user.uid, user.username);
        Ok(Some(user.with_derived(derived)))
    }

    /// The local-mode identity, granted everything `superuser` can open
    ///
    /// Reads the backup directly and never touches the store.
    pub async fn dev_identity(&self) -> UserIdentity {
        let derived = match self.resolver.loader().fetch_backup().await {
            Ok(structure) => DerivedAccess::compute(&BTreeSet::from([SUPERUSER.to_string()]), &structure),
            Err(e) => {
                log::warn!("Dev identity has no catalog to resolve against: {}", e);
                DerivedAccess::default()
            }
        };
        UserIdentity::dev(&self.dev_username, derived)
    }

    async fn read(&self, uid: &str) -> Result<Option<(SessionKeys, UserIdentity)>> {
        let keys = SessionKeys::by_uid(uid);
        if self.store.get(&keys.validity).await?.is_none() {
            return Ok(None);
        }

        let Some(username) = self.store.get(&keys.username).await? else {
            log::warn!("Identity {} has no username key; treating it as expired", uid);
            return Ok(None);
        };
        let first_name = self.store.get(&keys.first_name).await?;
        let groups = self.store.smembers(&keys.groups).await?;
        let snapshot = self.store.json_get(&keys.access).await?;
        let keys = keys.with_username(&username);

        let derived = match snapshot.map(serde_json::from_value::<DerivedAccess>) {
            Some(Ok(derived)) => derived,
            Some(Err(e)) => {
                log::warn!("Discarding malformed access snapshot of {}: {}", uid, e);
                self.snapshot(&keys, &groups).await?
            }
            None => self.snapshot(&keys, &groups).await?,
        };

        let user = UserIdentity::new(uid, username, first_name.as_deref()).with_groups(groups).with_derived(derived);
        Ok(Some((keys, user)))
    }

    async fn write(&self, user: &UserIdentity) -> Result<()> {
        let keys = SessionKeys::new(&user.uid, &user.username);

        self.store.set(&keys.validity, "1").await?;
        self.store.set(&keys.username_index, &user.uid).await?;
        self.store.set(&keys.username, &user.username).await?;
        self.store.set(&keys.first_name, &user.first_name).await?;
        self.store.delete(&keys.groups).await?;
        for group in &user.groups {
            self.store.sadd(&keys.groups, group).await?;
        }
        self.store.json_set(&keys.access, serde_json::to_value(user.derived()).map_err(StoreError::from)?).await?;

        self.refresh_keys(&keys).await?;
        Ok(())
    }

    async fn snapshot(&self, keys: &SessionKeys, groups: &BTreeSet<String>) -> Result<DerivedAccess> {
        let derived = self.resolver.enrich(groups).await?;
        self.store.json_set(&keys.access, serde_json::to_value(&derived).map_err(StoreError::from)?).await?;
        Ok(derived)
    }

    /// Whether `<username>` still resolves to this identity's uid
    async fn owns_index(&self, keys: &SessionKeys) -> Result<bool> {
        let bound = self.store.get(&keys.username_index).await?;
        Ok(bound.as_deref() == Some(keys.validity.as_str()))
    }

    /// Slide the TTL of the identity's keys
    ///
    /// The username index only follows when it is still bound to this uid;
    /// a rebound index belongs to the newer session and is not counted as
    /// missing.
    async fn refresh_keys(&self, keys: &SessionKeys) -> Result<bool> {
        let ttl = self.ttl;
        let mut batch = keys.owned().to_vec();
        if self.owns_index(keys).await? {
            batch.push(&keys.username_index);
        }
        let refreshed = try_join_all(batch.into_iter().map(|key| self.store.expire(key, ttl))).await?;

        let missing = refreshed.iter().filter(|r| !**r).count();
        if missing > 0 {
            log::warn!("Partial refresh of identity {}: {} of {} keys missing", keys.validity, missing, refreshed.len());
        }
        Ok(missing == 0)
    }

    /// Give a freshly created groups set the TTL of its identity
    async fn align_ttl(&self, uid: &str, key: &str) -> Result<()> {
        if self.store.ttl(key).await?.is_some() {
            return Ok(());
        }
        if let Some(remaining) = self.store.ttl(uid).await? {
            self.store.expire(key, remaining).await?;
        }
        Ok(())
    }
}
