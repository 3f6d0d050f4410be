//! Privilege lifecycle for Sudoward.
//!
//! [`PrivilegeStore`] is the authoritative record of active grants.
//! [`GrantEngine`] and [`RevokeEngine`] are the only code paths that
//! change it, and both keep the host artifact, the store and the audit
//! log consistent under a per-principal lock.

pub mod grant;
pub mod orphans;
pub mod revoke;
pub mod store;

#[cfg(test)]
mod testing;

pub use grant::GrantEngine;
pub use orphans::find_orphans;
pub use revoke::{EXPIRED_REASON, RevokeEngine, SCHEDULER_ACTOR};
pub use store::PrivilegeStore;
