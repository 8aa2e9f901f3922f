//! Background expiry sweep over a shared store
//!
//! Reads already hide expired keys; the sweep only reclaims memory for
//! identities nobody looks up again.

use super::{SessionStore, StoreResult};
use crate::config::SessionsConfig;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Running totals of the sweeps run against one store
#[derive(Debug, Default)]
pub struct SweepStats {
    runs: AtomicU64,
    failures: AtomicU64,
    purged: AtomicUsize,
}

impl SweepStats {
    /// Sweeps attempted, failed ones included
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Expired keys reclaimed over all sweeps
    pub fn purged(&self) -> usize {
        self.purged.load(Ordering::Relaxed)
    }
}

async fn sweep<S: SessionStore + ?Sized>(store: &S, stats: &SweepStats) -> StoreResult<usize> {
    stats.runs.fetch_add(1, Ordering::Relaxed);
    match store.purge_expired().await {
        Ok(purged) => {
            stats.purged.fetch_add(purged, Ordering::Relaxed);
            Ok(purged)
        }
        Err(e) => {
            stats.failures.fetch_add(1, Ordering::Relaxed);
            Err(e)
        }
    }
}

/// A shared store, optionally swept in the background
///
/// The sweep task is aborted when the manager is dropped.
///
/// ```no_run
/// use accessgraph_core::config::SessionsConfig;
/// use accessgraph_core::store::{MemoryStore, StoreManager};
///
/// # async fn example() {
/// let manager = StoreManager::from_config(MemoryStore::new(), &SessionsConfig::default());
/// let store = manager.store();
/// # }
/// ```
pub struct StoreManager<S: SessionStore> {
    store: Arc<S>,
    stats: Arc<SweepStats>,
    sweeper: Option<JoinHandle<()>>,
}

impl<S: SessionStore + 'static> StoreManager<S> {
    /// Wrap `store` with no background sweep
    pub fn new(store: S) -> Self {
        Self { store: Arc::new(store), stats: Arc::default(), sweeper: None }
    }

    /// Wrap `store`, sweeping every `sweep_interval_secs` when `auto_sweep` is set
    ///
    /// Must be called within a tokio runtime when the sweep is enabled.
    pub fn from_config(store: S, config: &SessionsConfig) -> Self {
        let manager = Self::new(store);
        if config.auto_sweep {
            manager.with_sweep(Duration::from_secs(config.sweep_interval_secs.max(1)))
        } else {
            manager
        }
    }

    /// Start the background sweep, replacing any running one
    pub fn with_sweep(mut self, every: Duration) -> Self {
        if let Some(previous) = self.sweeper.take() {
            previous.abort();
        }

        let store = Arc::clone(&self.store);
        let stats = Arc::clone(&self.stats);
        self.sweeper = Some(tokio::spawn(async move {
            let mut ticks = tokio::time::interval(every);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                match sweep(store.as_ref(), &stats).await {
                    Ok(0) => {}
                    Ok(purged) => log::debug!("Sweep reclaimed {} expired keys", purged),
                    Err(e) => log::warn!("Store sweep failed: {}", e),
                }
            }
        }));
        self
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.is_some()
    }

    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }

    /// Sweep immediately, counted with the background runs
    pub async fn sweep_now(&self) -> StoreResult<usize> {
        sweep(self.store.as_ref(), &self.stats).await
    }
}

impl<S: SessionStore> Drop for StoreManager<S> {
    fn drop(&mut self) {
        if let Some(task) = self.sweeper.take() {
            task.abort();
        }
    }
}
