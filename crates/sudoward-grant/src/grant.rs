//! Grant execution.

use std::sync::Arc;

use tracing::{error, info, warn};

use sudoward_core::config::GrantConfig;
use sudoward_core::error::AppError;
use sudoward_core::result::AppResult;
use sudoward_core::traits::{ArtifactWriter, AuditSink, Clock, SystemProbe};
use sudoward_core::types::{AuditEntry, GrantDuration, Principal, Session};

use crate::store::PrivilegeStore;

/// Validates and executes grants.
#[derive(Debug, Clone)]
pub struct GrantEngine {
    store: Arc<PrivilegeStore>,
    probe: Arc<dyn SystemProbe>,
    artifacts: Arc<dyn ArtifactWriter>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    /// Upper bound on a single grant, if configured.
    max_duration_hours: Option<i64>,
}

impl GrantEngine {
    /// Creates a new grant engine.
    pub fn new(
        store: Arc<PrivilegeStore>,
        probe: Arc<dyn SystemProbe>,
        artifacts: Arc<dyn ArtifactWriter>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        config: &GrantConfig,
    ) -> Self {
        Self {
            store,
            probe,
            artifacts,
            audit,
            clock,
            max_duration_hours: config.max_duration_hours,
        }
    }

    /// Grant `principal` elevated rights for `duration_hours`.
    ///
    /// Any existing session for the principal is replaced, and every
    /// successful call appends its own GRANT entry. When the artifact cannot
    /// be written nothing is committed and nothing is audited.
    pub async fn grant(
        &self,
        principal: &Principal,
        duration_hours: f64,
        request_id: Option<&str>,
        actor: &str,
    ) -> AppResult<Session> {
        let duration = GrantDuration::hours(duration_hours, self.max_duration_hours)?;

        let _guard = self.store.lock(principal).await;

        match self.probe.exists(principal).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(AppError::unknown_principal(format!(
                    "User '{principal}' does not exist on this host"
                )));
            }
            Err(e) => {
                warn!(principal = %principal, error = %e, "Account lookup failed during grant");
                return Err(e);
            }
        }

        let artifact_ref = self.artifacts.create(principal).await.map_err(|e| {
            error!(principal = %principal, error = %e, "Failed to install sudo artifact");
            e
        })?;

        let granted_at = self.clock.now();
        let session = Session {
            principal: principal.clone(),
            artifact_ref,
            granted_at,
            expires_at: granted_at + duration.as_chrono(),
            request_id: request_id.map(String::from),
            granted_by: actor.to_string(),
        };

        if let Some(previous) = self.store.put(session.clone()) {
            info!(
                principal = %principal,
                previous_expires_at = %previous.expires_at,
                "Replaced existing sudo session"
            );
        }

        let entry = AuditEntry::grant(granted_at, principal, duration, request_id, actor);
        if let Err(e) = self.audit.append(&entry).await {
            error!(principal = %principal, error = %e, "Failed to record grant in audit log");
        }

        info!(
            principal = %principal,
            actor = %actor,
            duration_hours = duration.as_hours(),
            expires_at = %session.expires_at,
            "Sudo access granted"
        );

        Ok(session)
    }
}
