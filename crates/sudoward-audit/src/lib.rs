//! Audit log for Sudoward.
//!
//! Every grant and revocation is recorded as one [`AuditEntry`] line. The
//! log is append-only: entries are never rewritten or removed.
//!
//! [`AuditEntry`]: sudoward_core::types::AuditEntry

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlAuditLog;
pub use memory::MemoryAuditLog;
