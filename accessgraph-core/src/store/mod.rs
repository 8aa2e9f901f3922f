//! Shared session store for accessgraph
//!
//! Every component that needs shared mutable state goes through the
//! [`SessionStore`] trait:
//! - string keys with optional TTL (`get`/`set`/`expire`)
//! - set-valued keys with atomic add/remove (`sadd`/`srem`/`smembers`)
//! - JSON documents (`json_get`/`json_set`) for the auth structure
//!
//! The trait is shaped after a Redis-like remote store so a network-backed
//! implementation can be dropped in; [`MemoryStore`] is the in-process
//! implementation used for local runs and tests.
//!
//! # Example
//!
//! ```no_run
//! use accessgraph_core::store::{MemoryStore, SessionStore};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), accessgraph_core::store::StoreError> {
//! let store = MemoryStore::new();
//! store.set("abc123", "1").await?;
//! store.expire("abc123", Duration::from_secs(1800)).await?;
//! # Ok(())
//! # }
//! ```

mod clock;
mod manager;
mod memory;
mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{StoreManager, SweepStats};
pub use memory::MemoryStore;
pub use traits::SessionStore;

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`SessionStore`] backend
///
/// A missing key is never an error; reads return `None` or an empty set.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached or is in a broken state
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// A JSON document could not be encoded or decoded
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The key holds a value of another kind (e.g. `sadd` on a string key)
    #[error("Wrong value type for key '{key}': expected {expected}")]
    WrongType { key: String, expected: &'static str },
}
