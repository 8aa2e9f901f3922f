//! Session store trait

use super::StoreResult;
use std::collections::BTreeSet;
use std::time::Duration;

/// Key-value store shared by every accessgraph component
///
/// Implementations must make each individual operation atomic per key.
/// No cross-key transactions are assumed by callers.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Get a string value
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Set a string value, clearing any TTL on the key
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a key of any type
    /// Returns true if the key existed
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Set a TTL on an existing key
    /// Returns false if the key does not exist
    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool>;

    /// Remaining time to live, `None` if the key is missing or has no TTL
    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>>;

    /// Add a member to a set, creating the set if needed
    /// Returns true if the member was not already present
    async fn sadd(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// Remove a member from a set
    /// Returns true if the member was present
    async fn srem(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// All members of a set (empty when the key is missing)
    async fn smembers(&self, key: &str) -> StoreResult<BTreeSet<String>>;

    /// Get a JSON document
    async fn json_get(&self, key: &str) -> StoreResult<Option<serde_json::Value>>;

    /// Replace a JSON document, clearing any TTL on the key
    async fn json_set(&self, key: &str, value: serde_json::Value) -> StoreResult<()>;

    /// Check if a key of any type exists
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Physically remove expired keys
    /// Returns the number of keys removed
    async fn purge_expired(&self) -> StoreResult<usize>;
}

// Implement SessionStore for Arc<S> to allow sharing one store between components
#[async_trait::async_trait]
impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        (**self).delete(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        (**self).expire(key, ttl).await
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<Duration>> {
        (**self).ttl(key).await
    }

    async fn sadd(&self, key: &str, member: &str) -> StoreResult<bool> {
        (**self).sadd(key, member).await
    }

    async fn srem(&self, key: &str, member: &str) -> StoreResult<bool> {
        (**self).srem(key, member).await
    }

    async fn smembers(&self, key: &str) -> StoreResult<BTreeSet<String>> {
        (**self).smembers(key).await
    }

    async fn json_get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        (**self).json_get(key).await
    }

    async fn json_set(&self, key: &str, value: serde_json::Value) -> StoreResult<()> {
        (**self).json_set(key, value).await
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key).await
    }

    async fn purge_expired(&self) -> StoreResult<usize> {
        (**self).purge_expired().await
    }
}
