//! Audit sink trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::AuditEntry;

/// Append-only destination for audit entries.
#[async_trait]
pub trait AuditSink: Send + Sync + std::fmt::Debug + 'static {
    /// Append one entry. Failures are returned, never swallowed.
    async fn append(&self, entry: &AuditEntry) -> AppResult<()>;

    /// The most recent `limit` entries, oldest first.
    async fn recent(&self, limit: usize) -> AppResult<Vec<AuditEntry>>;
}
