//! Shared fixtures for engine tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use sudoward_audit::MemoryAuditLog;
use sudoward_core::config::GrantConfig;
use sudoward_core::traits::ManualClock;
use sudoward_core::types::{ArtifactRef, Principal, Session};
use sudoward_host::fake::{FakeArtifactWriter, FakeSystemProbe};

use crate::{GrantEngine, PrivilegeStore, RevokeEngine};

pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub(crate) fn p(name: &str) -> Principal {
    Principal::parse(name).unwrap()
}

pub(crate) fn session_for(name: &str, granted_at: DateTime<Utc>, hours: i64) -> Session {
    Session {
        principal: p(name),
        artifact_ref: ArtifactRef::new(format!("fake://{name}")),
        granted_at,
        expires_at: granted_at + Duration::hours(hours),
        request_id: None,
        granted_by: "admin".to_string(),
    }
}

pub(crate) struct Harness {
    pub store: Arc<PrivilegeStore>,
    pub probe: Arc<FakeSystemProbe>,
    pub artifacts: Arc<FakeArtifactWriter>,
    pub audit: Arc<MemoryAuditLog>,
    pub clock: Arc<ManualClock>,
    pub grants: GrantEngine,
    pub revokes: RevokeEngine,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_max(None)
    }

    pub fn with_max(max_duration_hours: Option<i64>) -> Self {
        let store = Arc::new(PrivilegeStore::new());
        let probe = Arc::new(
            FakeSystemProbe::new()
                .with_user("alice", &["alice", "adm"])
                .with_user("bob", &["bob"]),
        );
        let artifacts = Arc::new(FakeArtifactWriter::new());
        let audit = Arc::new(MemoryAuditLog::new());
        let clock = Arc::new(ManualClock::new(t0()));
        let config = GrantConfig {
            max_duration_hours,
            ..GrantConfig::default()
        };

        let grants = GrantEngine::new(
            Arc::clone(&store),
            probe.clone(),
            artifacts.clone(),
            audit.clone(),
            clock.clone(),
            &config,
        );
        let revokes = RevokeEngine::new(
            Arc::clone(&store),
            artifacts.clone(),
            audit.clone(),
            clock.clone(),
        );

        Self {
            store,
            probe,
            artifacts,
            audit,
            clock,
            grants,
            revokes,
        }
    }
}
