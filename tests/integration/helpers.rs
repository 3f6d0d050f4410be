//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use sudoward_api::AppState;
use sudoward_audit::MemoryAuditLog;
use sudoward_core::config::AppConfig;
use sudoward_core::traits::ManualClock;
use sudoward_host::fake::{FakeArtifactWriter, FakeSystemProbe};
use sudoward_worker::ExpirySweeper;

/// 2025-01-01T00:00:00Z, the start of every test clock.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state behind the router
    pub state: AppState,
    /// Fake account database
    pub probe: Arc<FakeSystemProbe>,
    /// Fake drop-in directory
    pub artifacts: Arc<FakeArtifactWriter>,
    /// In-memory audit log
    pub audit: Arc<MemoryAuditLog>,
    /// Controllable clock
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a new test application with accounts `alice` and `bob`
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let probe = Arc::new(
            FakeSystemProbe::new()
                .with_user("alice", &["alice", "adm", "docker"])
                .with_user("bob", &["bob"]),
        );
        let artifacts = Arc::new(FakeArtifactWriter::new());
        let audit = Arc::new(MemoryAuditLog::new());
        let clock = Arc::new(ManualClock::new(t0()));

        let state = AppState::new(
            config.clone(),
            probe.clone(),
            artifacts.clone(),
            audit.clone(),
            clock.clone(),
        );
        let router = sudoward_api::build_app(state.clone(), &config.server.cors);

        Self {
            router,
            state,
            probe,
            artifacts,
            audit,
            clock,
        }
    }

    /// Expiry sweeper sharing this app's store and engines
    pub fn sweeper(&self) -> ExpirySweeper {
        ExpirySweeper::new(
            Arc::clone(&self.state.store),
            self.state.revokes.as_ref().clone(),
            self.state.clock.clone(),
            &self.state.config.sweeper,
        )
    }

    /// Grant through the API and assert success
    pub async fn grant(&self, principal: &str, hours: i64) -> TestResponse {
        let response = self
            .request(
                "POST",
                "/api/sudo/grant",
                Some(serde_json::json!({
                    "principal": principal,
                    "duration_hours": hours,
                    "actor": "admin",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Grant failed: {:?}", response.body);
        response
    }

    /// Actions of `/api/sudo/logs`, oldest first
    pub async fn logged_actions(&self) -> Vec<String> {
        let response = self.request("GET", "/api/sudo/logs", None).await;
        assert_eq!(response.status, StatusCode::OK);
        response
            .body
            .as_array()
            .expect("logs must be an array")
            .iter()
            .map(|e| e["action"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Principals of `/api/sudo/active`
    pub async fn active_principals(&self) -> Vec<String> {
        let response = self.request("GET", "/api/sudo/active", None).await;
        assert_eq!(response.status, StatusCode::OK);
        response
            .body
            .as_array()
            .expect("active must be an array")
            .iter()
            .map(|s| s["principal"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
