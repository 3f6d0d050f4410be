//! Audit log configuration.

use serde::{Deserialize, Serialize};

/// Audit log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Path of the newline-delimited JSON audit log.
    #[serde(default = "default_path")]
    pub path: String,
    /// Number of most recent entries returned by readers.
    #[serde(default = "default_tail_limit")]
    pub tail_limit: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            tail_limit: default_tail_limit(),
        }
    }
}

fn default_path() -> String {
    "/var/log/sudo-access-manager.log".to_string()
}

fn default_tail_limit() -> usize {
    100
}
