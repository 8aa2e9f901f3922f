//! In-memory session store
//!
//! This implementation uses a thread-safe HashMap with RwLock.
//! Suitable for development, the CLI and single-process deployments.
//! Expired keys are hidden from reads immediately and dropped lazily.

use super::clock::{to_chrono, Clock, SystemClock};
use super::traits::SessionStore;
use super::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Value {
    Str(String),
    Set(BTreeSet<String>),
    Json(serde_json::Value),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Set(_) => "set",
            Value::Json(_) => "json",
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn new(value: Value) -> Self {
        Self { value, expires_at: None }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

type Entries = HashMap<String, Entry>;

/// In-memory session store
///
/// Thread-safe storage using `RwLock<HashMap>`; every operation holds the
/// lock for its whole duration, so single-key operations are atomic.
/// Data is lost on process restart.
///
/// # Example
///
/// ```
/// use accessgraph_core::store::{ManualClock, MemoryStore};
///
/// let clock = ManualClock::new();
/// let store = MemoryStore::with_clock(clock.clone());
/// ```
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<Entries>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create a new store on the wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create a new store driven by the given clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), clock: Arc::new(clock) }
    }

    /// Number of live keys
    pub fn key_count(&self) -> StoreResult<usize> {
        let now = self.clock.now();
        Ok(self.read()?.values().filter(|e| e.is_live(now)).count())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Entries>> {
        self.entries
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Entries>> {
        self.entries
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    /// Look up a live entry, dropping it first if it has expired
    fn live_mut<'a>(entries: &'a mut Entries, key: &str, now: DateTime<Utc>) -> Option<&'a mut Entry> {
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        entries.get_mut(key)
    }

    fn wrong_type(key: &str, expected: &'static str) -> StoreError {
        StoreError::WrongType { key: key.to_string(), expected }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = self.clock.now();
        let entries = self.read()?;
        match entries.get(key).filter(|e| e.is_live(now)) {
            None => Ok(None),
            Some(Entry { value: Value::Str(s), .. }) => Ok(Some(s.clone())),
            Some(_) => Err(Self::wrong_type(key, "string")),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.write()?;
        entries.insert(key.to_string(), Entry::new(Value::Str(value.to_string())));
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let now = self.clock.now();
        let mut entries = self.write()?;
        Ok(entries.remove(key).is_some_and(|e| e.is_live(now)))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let now = self.clock.now();
        let mut entries = self.write()?;
        match Self::live_mut(&mut entries, key, now) {
            Some(entry) => {
                entry.expires_at = now.checked_add_signed(to_chrono(ttl));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>> {
        let now = self.clock.now();
        let entries = self.read()?;
        Ok(entries
            .get(key)
            .filter(|e| e.is_live(now))
            .and_then(|e| e.expires_at)
            .and_then(|at| (at - now).to_std().ok()))
    }

    async fn sadd(&self, key: &str, member: &str) -> StoreResult<bool> {
        let now = self.clock.now();
        let mut entries = self.write()?;
        match Self::live_mut(&mut entries, key, now) {
            Some(Entry { value: Value::Set(members), .. }) => Ok(members.insert(member.to_string())),
            Some(_) => Err(Self::wrong_type(key, "set")),
            None => {
                let members = BTreeSet::from([member.to_string()]);
                entries.insert(key.to_string(), Entry::new(Value::Set(members)));
                Ok(true)
            }
        }
    }

    async fn srem(&self, key: &str, member: &str) -> StoreResult<bool> {
        let now = self.clock.now();
        let mut entries = self.write()?;
        let removed = match Self::live_mut(&mut entries, key, now) {
            Some(Entry { value: Value::Set(members), .. }) => members.remove(member),
            Some(_) => return Err(Self::wrong_type(key, "set")),
            None => return Ok(false),
        };
        // Redis drops a set once its last member is gone
        if entries.get(key).is_some_and(|e| matches!(&e.value, Value::Set(m) if m.is_empty())) {
            entries.remove(key);
        }
        Ok(removed)
    }

    async fn smembers(&self, key: &str) -> StoreResult<BTreeSet<String>> {
        let now = self.clock.now();
        let entries = self.read()?;
        match entries.get(key).filter(|e| e.is_live(now)) {
            None => Ok(BTreeSet::new()),
            Some(Entry { value: Value::Set(members), .. }) => Ok(members.clone()),
            Some(_) => Err(Self::wrong_type(key, "set")),
        }
    }

    async fn json_get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        let now = self.clock.now();
        let entries = self.read()?;
        match entries.get(key).filter(|e| e.is_live(now)) {
            None => Ok(None),
            Some(Entry { value: Value::Json(doc), .. }) => Ok(Some(doc.clone())),
            Some(_) => Err(Self::wrong_type(key, "json")),
        }
    }

    async fn json_set(&self, key: &str, value: serde_json::Value) -> StoreResult<()> {
        let mut entries = self.write()?;
        entries.insert(key.to_string(), Entry::new(Value::Json(value)));
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let now = self.clock.now();
        Ok(self.read()?.get(key).is_some_and(|e| e.is_live(now)))
    }

    async fn purge_expired(&self) -> StoreResult<usize> {
        let now = self.clock.now();
        let mut entries = self.write()?;
        let initial_count = entries.len();

        entries.retain(|key, entry| {
            let live = entry.is_live(now);
            if !live {
                log::trace!("Purging expired {} key '{}'", entry.value.kind(), key);
            }
            live
        });

        Ok(initial_count - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ManualClock;

    #[tokio::test]
    async fn test_string_roundtrip_and_delete() {
        let store = MemoryStore::new();

        store.set("abc", "1").await.unwrap();
        assert_eq!(store.get("abc").await.unwrap(), Some("1".to_string()));
        assert!(store.exists("abc").await.unwrap());

        assert!(store.delete("abc").await.unwrap());
        assert!(!store.delete("abc").await.unwrap());
        assert_eq!(store.get("abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ttl_expiry_with_manual_clock() {
        let clock = ManualClock::new();
        let store = MemoryStore::with_clock(clock.clone());

        store.set("session", "1").await.unwrap();
        assert!(store.expire("session", Duration::from_secs(1800)).await.unwrap());

        clock.advance(Duration::from_secs(1799));
        assert_eq!(store.get("session").await.unwrap(), Some("1".to_string()));

        clock.advance(Duration::from_secs(2));
        assert_eq!(store.get("session").await.unwrap(), None);
        assert!(!store.exists("session").await.unwrap());
        assert!(!store.expire("session", Duration::from_secs(10)).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_clears_ttl() {
        let clock = ManualClock::new();
        let store = MemoryStore::with_clock(clock.clone());

        store.set("k", "a").await.unwrap();
        store.expire("k", Duration::from_secs(5)).await.unwrap();
        assert!(store.ttl("k").await.unwrap().is_some());

        store.set("k", "b").await.unwrap();
        assert_eq!(store.ttl("k").await.unwrap(), None);

        clock.advance(Duration::from_secs(60));
        assert_eq!(store.get("k").await.unwrap(), Some("b".to_string()));
    }

    #[tokio::test]
    async fn test_set_operations_keep_ttl() {
        let clock = ManualClock::new();
        let store = MemoryStore::with_clock(clock.clone());

        assert!(store.sadd("u_groups", "A").await.unwrap());
        assert!(!store.sadd("u_groups", "A").await.unwrap());
        store.expire("u_groups", Duration::from_secs(100)).await.unwrap();

        assert!(store.sadd("u_groups", "C").await.unwrap());
        assert_eq!(
            store.smembers("u_groups").await.unwrap(),
            BTreeSet::from(["A".to_string(), "C".to_string()])
        );
        assert_eq!(store.ttl("u_groups").await.unwrap(), Some(Duration::from_secs(100)));

        assert!(store.srem("u_groups", "A").await.unwrap());
        assert!(!store.srem("u_groups", "A").await.unwrap());
        assert!(store.srem("u_groups", "C").await.unwrap());
        assert!(!store.exists("u_groups").await.unwrap());
    }

    #[tokio::test]
    async fn test_wrong_type_is_reported() {
        let store = MemoryStore::new();
        store.set("plain", "x").await.unwrap();

        let err = store.sadd("plain", "member").await.unwrap_err();
        assert!(matches!(err, StoreError::WrongType { expected: "set", .. }));
        assert!(store.json_get("plain").await.is_err());
    }

    #[tokio::test]
    async fn test_json_documents() {
        let store = MemoryStore::new();
        let doc = serde_json::json!({"A": ["B"], "B": []});

        store.json_set("user_groups", doc.clone()).await.unwrap();
        assert_eq!(store.json_get("user_groups").await.unwrap(), Some(doc));
        assert_eq!(store.json_get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let clock = ManualClock::new();
        let store = MemoryStore::with_clock(clock.clone());

        store.set("expiring", "1").await.unwrap();
        store.expire("expiring", Duration::from_secs(1)).await.unwrap();
        store.set("durable", "1").await.unwrap();

        clock.advance(Duration::from_secs(2));
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.key_count().unwrap(), 1);
        assert!(store.exists("durable").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_sadd_is_commutative() {
        let store = MemoryStore::new();

        let mut handles = vec![];
        for i in 0..10 {
            let store_clone = store.clone();
            handles.push(tokio::spawn(async move {
                store_clone.sadd("shared_groups", &format!("group-{}", i)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.smembers("shared_groups").await.unwrap().len(), 10);
    }
}
