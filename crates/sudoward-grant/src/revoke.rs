//! Revocation, manual and expiry-driven.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use sudoward_core::error::AppError;
use sudoward_core::result::AppResult;
use sudoward_core::traits::{ArtifactWriter, AuditSink, Clock};
use sudoward_core::types::{AuditAction, AuditEntry, Principal, Session};

use crate::store::PrivilegeStore;

/// Actor recorded for expiry-driven revocations.
pub const SCHEDULER_ACTOR: &str = "scheduler";

/// Reason recorded for expiry-driven revocations.
pub const EXPIRED_REASON: &str = "expired";

/// Removes grants from the host and the store.
#[derive(Debug, Clone)]
pub struct RevokeEngine {
    store: Arc<PrivilegeStore>,
    artifacts: Arc<dyn ArtifactWriter>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
}

impl RevokeEngine {
    /// Creates a new revoke engine.
    pub fn new(
        store: Arc<PrivilegeStore>,
        artifacts: Arc<dyn ArtifactWriter>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            artifacts,
            audit,
            clock,
        }
    }

    /// Revoke `principal`'s active grant on request.
    ///
    /// Fails with `NoActiveSession` when there is nothing to revoke. When the
    /// artifact cannot be removed the session stays in place.
    pub async fn revoke(&self, principal: &Principal, actor: &str, reason: &str) -> AppResult<Session> {
        let _guard = self.store.lock(principal).await;

        let session = self.store.get(principal).ok_or_else(|| {
            AppError::no_active_session(format!("No active sudo session for '{principal}'"))
        })?;

        self.remove_and_record(session, AuditAction::Revoke, actor, reason)
            .await
    }

    /// Revoke `principal`'s grant if it is still expired at `now`.
    ///
    /// Returns `Ok(None)` when the session was revoked or renewed since the
    /// caller looked at it.
    pub async fn revoke_expired(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>> {
        let _guard = self.store.lock(principal).await;

        let Some(session) = self.store.get(principal) else {
            debug!(principal = %principal, "Session already gone before expiry revoke");
            return Ok(None);
        };
        if !session.is_expired_at(now) {
            debug!(
                principal = %principal,
                expires_at = %session.expires_at,
                "Session renewed before expiry revoke"
            );
            return Ok(None);
        }

        self.remove_and_record(session, AuditAction::AutoRevoke, SCHEDULER_ACTOR, EXPIRED_REASON)
            .await
            .map(Some)
    }

    /// Caller must hold the principal lock.
    async fn remove_and_record(
        &self,
        session: Session,
        action: AuditAction,
        actor: &str,
        reason: &str,
    ) -> AppResult<Session> {
        let principal = &session.principal;

        if let Err(e) = self.artifacts.remove(&session.artifact_ref).await {
            error!(
                principal = %principal,
                artifact = %session.artifact_ref,
                error = %e,
                "Failed to remove sudo artifact; session kept"
            );
            return Err(e);
        }

        self.store.remove(principal);

        let entry = AuditEntry::revoke(self.clock.now(), principal, action, reason, actor);
        if let Err(e) = self.audit.append(&entry).await {
            error!(principal = %principal, error = %e, "Failed to record revocation in audit log");
        }

        info!(
            principal = %principal,
            actor = %actor,
            action = %action,
            reason = %reason,
            "Sudo access revoked"
        );

        Ok(session)
    }
}
