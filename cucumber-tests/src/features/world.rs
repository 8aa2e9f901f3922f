#![allow(dead_code)]
use accessgraph_core::access::DerivedAccess;
use accessgraph_core::catalog::{AppsMap, AuthStructure, AuthStructureLoader, InheritanceMap, StaticBackup};
use accessgraph_core::identity::{Identity, IdentityManager};
use accessgraph_core::store::{ManualClock, MemoryStore};
use cucumber::World as CucumberWorld;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Scenario state: an auth structure built step by step, plus the store
/// and identities derived from it
#[derive(CucumberWorld)]
#[world(init = Self::new)]
pub struct AccessWorld {
    pub user_groups: InheritanceMap,
    pub ad_groups: InheritanceMap,
    pub apps: AppsMap,

    pub clock: ManualClock,
    pub store: Arc<MemoryStore>,
    identities: Option<IdentityManager>,

    pub inherited: BTreeSet<String>,
    pub derived: Option<DerivedAccess>,
    pub decision: Option<bool>,
    pub identity: Option<Identity>,
}

impl fmt::Debug for AccessWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessWorld")
            .field("user_groups", &self.user_groups)
            .field("ad_groups", &self.ad_groups)
            .field("apps", &self.apps)
            .field("inherited", &self.inherited)
            .field("decision", &self.decision)
            .finish_non_exhaustive()
    }
}

impl AccessWorld {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        Self {
            user_groups: InheritanceMap::new(),
            ad_groups: InheritanceMap::new(),
            apps: AppsMap::new(),
            store: Arc::new(MemoryStore::with_clock(clock.clone())),
            clock,
            identities: None,
            inherited: BTreeSet::new(),
            derived: None,
            decision: None,
            identity: None,
        }
    }

    pub fn structure(&self) -> AuthStructure {
        AuthStructure {
            apps: self.apps.clone(),
            user_groups: self.user_groups.clone(),
            ad_groups: self.ad_groups.clone(),
        }
    }

    /// The identity manager, created from the structure as declared so far
    pub fn identities(&mut self) -> IdentityManager {
        if self.identities.is_none() {
            let loader = AuthStructureLoader::new(StaticBackup::new(self.structure()));
            self.identities = Some(IdentityManager::new(self.store.clone(), loader));
        }
        self.identities.clone().unwrap()
    }
}

impl Default for AccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `"a, b"` into a set; blank entries are dropped
pub fn list(names: &str) -> BTreeSet<String> {
    names.split(',').map(str::trim).filter(|n| !n.is_empty()).map(str::to_string).collect()
}
