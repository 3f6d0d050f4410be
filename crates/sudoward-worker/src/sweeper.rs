//! Expiry sweep.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing;
use uuid::Uuid;

use sudoward_core::config::SweeperConfig;
use sudoward_core::traits::Clock;
use sudoward_grant::{PrivilegeStore, RevokeEngine};

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Sessions in the snapshot.
    pub examined: usize,
    /// Sessions revoked by this sweep.
    pub revoked: usize,
    /// Expired sessions whose revocation failed.
    pub failed: usize,
}

/// Revokes every session past its expiry.
#[derive(Debug, Clone)]
pub struct ExpirySweeper {
    /// Session store to scan.
    store: Arc<PrivilegeStore>,
    /// Engine performing the revocations.
    revokes: RevokeEngine,
    /// Time source.
    pub(crate) clock: Arc<dyn Clock>,
    /// Delay between sweeps.
    pub(crate) interval: Duration,
}

impl ExpirySweeper {
    /// Create a sweeper from configuration.
    pub fn new(
        store: Arc<PrivilegeStore>,
        revokes: RevokeEngine,
        clock: Arc<dyn Clock>,
        config: &SweeperConfig,
    ) -> Self {
        Self {
            store,
            revokes,
            clock,
            interval: config.interval(),
        }
    }

    /// Run one sweep as of `now`.
    ///
    /// A failure for one principal is recorded and the sweep moves on.
    pub async fn sweep_once(&self, now: DateTime<Utc>) -> SweepReport {
        let sweep_id = Uuid::new_v4();
        let snapshot = self.store.list();
        let mut report = SweepReport {
            examined: snapshot.len(),
            ..SweepReport::default()
        };

        for (principal, session) in snapshot {
            if !session.is_expired_at(now) {
                continue;
            }

            match self.revokes.revoke_expired(&principal, now).await {
                Ok(Some(_)) => report.revoked += 1,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        sweep_id = %sweep_id,
                        principal = %principal,
                        error = %e,
                        "Expired session could not be revoked; will retry next sweep"
                    );
                    report.failed += 1;
                }
            }
        }

        if report.revoked > 0 || report.failed > 0 {
            tracing::info!(
                sweep_id = %sweep_id,
                examined = report.examined,
                revoked = report.revoked,
                failed = report.failed,
                "Expiry sweep finished"
            );
        } else {
            tracing::debug!(sweep_id = %sweep_id, examined = report.examined, "Expiry sweep finished");
        }

        report
    }
}
