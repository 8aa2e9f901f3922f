//! Administration: the per-user access graph and group membership edits
//!
//! - [`AccessGraph`] is the pure picture of what a user can reach and why
//! - [`GraphStyle`] turns it into cytoscape elements
//! - [`AdminController`] edits membership through a [`GroupDirectory`] and
//!   mirrors the change into the user's live identity

mod controller;
mod directory;
mod graph;
pub mod style;

pub use controller::{AdminController, ChangeAction, GroupChangeReport, Notification};
pub use directory::{DirectoryError, DirectoryUser, GroupDirectory, MemoryDirectory};
pub use graph::{AccessGraph, Edge, Node};
pub use style::{Elements, GraphStyle};
