//! User identities and their lifecycle in the store
//!
//! An identity is written at login under a fixed set of keys (see
//! [`SessionKeys`]), kept alive by a sliding TTL, and read back into an
//! [`Identity`] on every request.

mod keys;
mod manager;
mod record;

pub use keys::{SessionKeys, UidKeys};
pub use manager::IdentityManager;
pub use record::{
    direct_groups, domain_group, Identity, UserIdentity, DEV_UID, EXTERNAL_GROUP, INTERNAL_GROUP, MISSING_NAME,
};
