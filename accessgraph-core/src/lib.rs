//! AccessGraph - Core
//!
//! Group-inheritance and app-access authorization for a dashboard platform.
//!
//! # Overview
//!
//! Users hold a handful of directory groups. Groups inherit other groups,
//! app instances require groups, and instances roll up into apps and
//! navigation sections. This crate resolves a user's groups through the
//! inheritance graph, decides which instances they may open, caches the
//! result as a sliding-TTL identity in a key-value store, and renders the
//! whole picture as a graph for administrators.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use accessgraph_core::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AccessGraphConfig::load()?;
//!     let catalog = Catalog::from_dir(&config.catalog).await?;
//!
//!     let store = Arc::new(MemoryStore::new());
//!     let loader = AuthStructureLoader::new(StaticBackup::from(&catalog));
//!     let identities = IdentityManager::from_config(store, loader, &config);
//!
//!     let user = identities.login("uid-1", "jane@kencogroup.com", Some("Jane"), ["analysts"]).await?;
//!     println!("{:?}", user.access.instances);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`store`] - Key-value store with TTL, sets and JSON documents
//! - [`catalog`] - Group inheritance and app catalog documents, backup loading
//! - [`access`] - Inheritance resolution, access decisions, navigation predicates
//! - [`identity`] - User identity lifecycle in the store
//! - [`admin`] - Access graph, cytoscape rendering, group membership edits
//! - [`config`] - Layered TOML + environment configuration
//! - [`logging`] - `log` facade backend

pub mod access;
pub mod admin;
pub mod catalog;
pub mod config;
pub mod identity;
pub mod logging;
pub mod store;

#[cfg(test)]
pub mod testing;

// Prelude module for convenient imports
pub mod prelude;

pub use access::{AccessResolver, AppAccess, DerivedAccess};
pub use admin::{AccessGraph, AdminController, DirectoryError, GroupDirectory};
pub use catalog::{AuthStructure, AuthStructureLoader, Catalog, CatalogError};
pub use identity::{Identity, IdentityManager, UserIdentity};
pub use store::{MemoryStore, SessionStore, StoreError};

// Main result type for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for accessgraph
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The key-value store failed or held an unexpected type
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// Catalog or backup documents could not be read
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// The group directory refused or failed a request
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}
