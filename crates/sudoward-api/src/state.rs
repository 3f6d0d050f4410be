//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sudoward_core::config::AppConfig;
use sudoward_core::traits::{ArtifactWriter, AuditSink, Clock, SystemProbe};
use sudoward_grant::{GrantEngine, PrivilegeStore, RevokeEngine};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active grant sessions
    pub store: Arc<PrivilegeStore>,
    /// Grant execution
    pub grants: Arc<GrantEngine>,
    /// Revoke execution, shared with the expiry sweeper
    pub revokes: Arc<RevokeEngine>,
    /// Host account queries
    pub probe: Arc<dyn SystemProbe>,
    /// Host privilege artifacts
    pub artifacts: Arc<dyn ArtifactWriter>,
    /// Audit log
    pub audit: Arc<dyn AuditSink>,
    /// Time source
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire the engines around the given host collaborators.
    pub fn new(
        config: AppConfig,
        probe: Arc<dyn SystemProbe>,
        artifacts: Arc<dyn ArtifactWriter>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = Arc::new(PrivilegeStore::new());
        let grants = Arc::new(GrantEngine::new(
            Arc::clone(&store),
            Arc::clone(&probe),
            Arc::clone(&artifacts),
            Arc::clone(&audit),
            Arc::clone(&clock),
            &config.grant,
        ));
        let revokes = Arc::new(RevokeEngine::new(
            Arc::clone(&store),
            Arc::clone(&artifacts),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));

        Self {
            config: Arc::new(config),
            store,
            grants,
            revokes,
            probe,
            artifacts,
            audit,
            clock,
        }
    }
}
