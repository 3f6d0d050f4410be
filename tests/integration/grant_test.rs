//! Integration tests for granting elevated privileges over HTTP.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_grant_sets_expiry_from_clock() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({
                "principal": "alice",
                "duration_hours": 4,
                "request_id": "req-17",
                "actor": "admin",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["expires_at"], "2025-01-01T04:00:00Z");
    assert_eq!(
        response.body["message"],
        "Sudo access granted to alice for 4 hours"
    );
    assert!(app.artifacts.exists("alice"));

    let active = app.request("GET", "/api/sudo/active", None).await;
    let sessions = active.body.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["principal"], "alice");
    assert_eq!(sessions[0]["granted_by"], "admin");
    assert_eq!(sessions[0]["request_id"], "req-17");

    let logs = app.request("GET", "/api/sudo/logs", None).await;
    let entries = logs.body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "GRANT");
    assert_eq!(entries[0]["details"], "Duration: 4h, Request: req-17");
    assert_eq!(entries[0]["actor"], "admin");
}

#[tokio::test]
async fn test_grant_accepts_dashboard_field_names() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({ "username": "bob", "duration": 2, "requestId": "r-1" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["expires_at"], "2025-01-01T02:00:00Z");

    let entries = app.audit.entries();
    assert_eq!(entries[0].actor, "api");
    assert_eq!(entries[0].details, "Duration: 2h, Request: r-1");
}

#[tokio::test]
async fn test_regrant_replaces_session() {
    let app = TestApp::new();
    app.grant("alice", 1).await;
    app.clock.advance(chrono::Duration::minutes(30));

    let response = app.grant("alice", 3).await;
    assert_eq!(response.body["expires_at"], "2025-01-01T03:30:00Z");

    assert_eq!(app.active_principals().await, vec!["alice"]);
    assert_eq!(app.logged_actions().await, vec!["GRANT", "GRANT"]);
}

#[tokio::test]
async fn test_grant_unknown_principal() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({ "principal": "mallory", "duration_hours": 1 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "UNKNOWN_PRINCIPAL");
    assert_eq!(app.artifacts.create_count(), 0);
    assert!(app.active_principals().await.is_empty());
    assert!(app.logged_actions().await.is_empty());
}

#[tokio::test]
async fn test_grant_rejects_bad_duration() {
    let app = TestApp::new();

    for hours in [0, -3] {
        let response = app
            .request(
                "POST",
                "/api/sudo/grant",
                Some(json!({ "principal": "alice", "duration_hours": hours })),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "INVALID_DURATION");
    }

    assert!(app.active_principals().await.is_empty());
    assert!(!app.artifacts.exists("alice"));
}

#[tokio::test]
async fn test_grant_rejects_malformed_principal() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({ "principal": "../etc/passwd", "duration_hours": 1 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_PRINCIPAL");
    assert_eq!(app.artifacts.create_count(), 0);
}

#[tokio::test]
async fn test_grant_artifact_failure_commits_nothing() {
    let app = TestApp::new();
    app.artifacts.fail_create_for("alice");

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({ "principal": "alice", "duration_hours": 1 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "ARTIFACT_WRITE_ERROR");
    assert!(app.active_principals().await.is_empty());
    assert!(app.logged_actions().await.is_empty());
}

#[tokio::test]
async fn test_grant_probe_failure_is_server_error() {
    let app = TestApp::new();
    app.probe.set_failing(true);

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({ "principal": "alice", "duration_hours": 1 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "PROBE_ERROR");
    assert!(app.active_principals().await.is_empty());
}

#[tokio::test]
async fn test_grant_survives_audit_failure() {
    let app = TestApp::new();
    app.audit.set_failing(true);

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({ "principal": "alice", "duration_hours": 1 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.artifacts.exists("alice"));
}

#[tokio::test]
async fn test_users_report_active_grants() {
    let app = TestApp::new();
    app.grant("alice", 2).await;

    let response = app.request("GET", "/api/system/users", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.body.as_array().unwrap();
    assert_eq!(users.len(), 2);

    let alice = users.iter().find(|u| u["principal"] == "alice").unwrap();
    assert_eq!(alice["has_active_grant"], true);
    assert_eq!(alice["groups"], json!(["alice", "adm", "docker"]));
    assert_eq!(alice["session"]["expires_at"], "2025-01-01T02:00:00Z");

    let bob = users.iter().find(|u| u["principal"] == "bob").unwrap();
    assert_eq!(bob["has_active_grant"], false);
    assert!(bob["session"].is_null());
}

#[tokio::test]
async fn test_users_probe_failure() {
    let app = TestApp::new();
    app.probe.set_failing(true);

    let response = app.request("GET", "/api/system/users", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "PROBE_ERROR");
}

#[tokio::test]
async fn test_health_counts_sessions() {
    let app = TestApp::new();
    app.grant("alice", 1).await;
    app.grant("bob", 1).await;

    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["active_sessions"], 2);
    assert_eq!(response.body["timestamp"], "2025-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_grant_accepts_fractional_hours() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/sudo/grant",
            Some(json!({ "principal": "alice", "duration_hours": 0.5 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["expires_at"], "2025-01-01T00:30:00Z");
    assert_eq!(
        response.body["message"],
        "Sudo access granted to alice for 0.5 hours"
    );
    assert_eq!(app.audit.entries()[0].details, "Duration: 0.5h, Request: none");
}

#[tokio::test]
async fn test_grant_malformed_body_uses_error_contract() {
    let app = TestApp::new();

    for body in [
        json!({ "duration_hours": 4 }),
        json!({ "username": "alice", "duration": "4" }),
        json!("alice"),
    ] {
        let response = app.request("POST", "/api/sudo/grant", Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "INVALID_REQUEST");
        assert!(response.body["message"].as_str().is_some());
    }

    assert_eq!(app.artifacts.create_count(), 0);
    assert!(app.logged_actions().await.is_empty());
}

#[tokio::test]
async fn test_grant_non_json_body_uses_error_contract() {
    let app = TestApp::new();

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/sudo/grant")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("principal=alice"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_rejected_requests_do_not_accumulate_locks() {
    let app = TestApp::new();

    for i in 0..200 {
        let name = format!("ghost{i}");
        let grant = app
            .request(
                "POST",
                "/api/sudo/grant",
                Some(json!({ "principal": name, "duration_hours": 1 })),
            )
            .await;
        assert_eq!(grant.status, StatusCode::BAD_REQUEST);
        let revoke = app
            .request("POST", "/api/sudo/revoke", Some(json!({ "principal": name })))
            .await;
        assert_eq!(revoke.status, StatusCode::NOT_FOUND);
    }

    assert!(app.state.store.is_empty());
    assert_eq!(app.state.store.lock_count(), 0);
}
