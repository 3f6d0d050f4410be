//! Audit log entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::duration::GrantDuration;
use super::principal::Principal;

/// The state-changing action an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Elevated rights were granted (or re-granted).
    Grant,
    /// Rights were revoked on request.
    Revoke,
    /// Rights were revoked by the expiry sweep.
    AutoRevoke,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grant => write!(f, "GRANT"),
            Self::Revoke => write!(f, "REVOKE"),
            Self::AutoRevoke => write!(f, "AUTO_REVOKE"),
        }
    }
}

/// An immutable audit log record. One JSON object per log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Account the action applied to.
    pub principal: String,
    /// What happened.
    pub action: AuditAction,
    /// Free text: duration, request id, reason.
    pub details: String,
    /// Who or what initiated the action.
    pub actor: String,
}

impl AuditEntry {
    /// Record a grant.
    pub fn grant(
        timestamp: DateTime<Utc>,
        principal: &Principal,
        duration: GrantDuration,
        request_id: Option<&str>,
        actor: &str,
    ) -> Self {
        Self {
            timestamp,
            principal: principal.to_string(),
            action: AuditAction::Grant,
            details: format!(
                "Duration: {}h, Request: {}",
                duration.as_hours(),
                request_id.unwrap_or("none")
            ),
            actor: actor.to_string(),
        }
    }

    /// Record a manual or automatic revocation.
    pub fn revoke(
        timestamp: DateTime<Utc>,
        principal: &Principal,
        action: AuditAction,
        reason: &str,
        actor: &str,
    ) -> Self {
        Self {
            timestamp,
            principal: principal.to_string(),
            action,
            details: reason.to_string(),
            actor: actor.to_string(),
        }
    }
}
