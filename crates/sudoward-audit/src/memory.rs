//! In-memory audit sink.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use sudoward_core::error::AppError;
use sudoward_core::result::AppResult;
use sudoward_core::traits::AuditSink;
use sudoward_core::types::{AuditAction, AuditEntry};

/// Audit sink that keeps entries in memory. Used by tests.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
    failing: AtomicBool,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every append and read fail, or succeed again.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All entries, in append order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Actions of all entries, in append order.
    pub fn actions(&self) -> Vec<AuditAction> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|e| e.action)
            .collect()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditLog {
    async fn append(&self, entry: &AuditEntry) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::audit_write("Simulated audit log failure"));
        }
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> AppResult<Vec<AuditEntry>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::audit_read("Simulated audit log failure"));
        }
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let start = entries.len().saturating_sub(limit);
        Ok(entries[start..].to_vec())
    }
}
