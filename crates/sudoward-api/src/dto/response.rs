//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sudoward_core::types::Session;

/// One host account as shown in the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemUserResponse {
    /// Account name.
    pub principal: String,
    /// Primary group first, then supplementary groups.
    pub groups: Vec<String>,
    /// Whether the account currently holds a grant.
    pub has_active_grant: bool,
    /// The active grant, if any.
    pub session: Option<Session>,
}

/// Successful grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantResponse {
    pub success: bool,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Successful revoke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub success: bool,
    pub message: String,
}

/// Liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
    /// Number of active grants.
    pub active_sessions: usize,
}
