//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use accessgraph_core::prelude::*;
//! ```

// === Configuration ===
pub use crate::config::AccessGraphConfig;
pub use crate::logging::init_logging;

// === Store ===
pub use crate::store::{MemoryStore, SessionStore, StoreManager};

// === Catalog ===
pub use crate::catalog::{AuthStructureLoader, BackupSource, Catalog, DirectoryBackup, StaticBackup};

// === Access decisions ===
pub use crate::access::{
    access_check, external_access_only, has_access, internal_access_only, navigation_sections,
    read_only_access, AccessResolver,
};

// === Identities ===
pub use crate::identity::{Identity, IdentityManager, UserIdentity};

// === Administration ===
pub use crate::admin::{AdminController, GraphStyle, GroupDirectory, MemoryDirectory};

// === Errors ===
pub use crate::{Error, Result};
