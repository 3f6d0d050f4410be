//! Domain types shared across all Sudoward crates.

pub mod audit;
pub mod duration;
pub mod principal;
pub mod session;

pub use audit::{AuditAction, AuditEntry};
pub use duration::GrantDuration;
pub use principal::Principal;
pub use session::{ArtifactRef, Session};
