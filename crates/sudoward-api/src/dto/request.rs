//! Request DTOs.
//!
//! Field aliases accept the camelCase names used by existing dashboard
//! clients.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/sudo/grant`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRequest {
    /// Account to elevate.
    #[serde(alias = "username")]
    pub principal: String,
    /// Grant length in hours; fractions are allowed.
    #[serde(alias = "duration")]
    pub duration_hours: f64,
    /// Approval request that led to this grant.
    #[serde(default, alias = "requestId")]
    pub request_id: Option<String>,
    /// Who is granting; defaults to `api`.
    #[serde(default)]
    pub actor: Option<String>,
}

/// Body of `POST /api/sudo/revoke`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeRequest {
    /// Account to revoke.
    #[serde(alias = "username")]
    pub principal: String,
    /// Free-text reason recorded in the audit log.
    #[serde(default)]
    pub reason: Option<String>,
    /// Who is revoking; defaults to `api`.
    #[serde(default)]
    pub actor: Option<String>,
}
