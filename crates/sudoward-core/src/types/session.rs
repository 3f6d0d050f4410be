//! Active grant sessions.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::principal::Principal;

/// Opaque handle to the on-host artifact backing a grant.
///
/// For the sudoers backend this is the drop-in file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRef(String);

impl ArtifactRef {
    /// Wrap a backend-specific reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Return the raw reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the reference as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One principal's active elevated-privilege grant.
///
/// Sessions are never mutated in place; a re-grant replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The account holding the grant.
    pub principal: Principal,
    /// Artifact created for this grant.
    pub artifact_ref: ArtifactRef,
    /// When the grant was made.
    pub granted_at: DateTime<Utc>,
    /// When the grant stops being valid. Always after `granted_at`.
    pub expires_at: DateTime<Utc>,
    /// Approval-workflow request that led to the grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Who initiated the grant.
    pub granted_by: String,
}

impl Session {
    /// Whether the grant is past expiry at `now` (inclusive).
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        (self.expires_at - now).max(chrono::Duration::zero())
    }
}
