//! Integration tests for manual revocation and the audit tail.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use sudoward_core::config::AppConfig;

use helpers::TestApp;

#[tokio::test]
async fn test_revoke_removes_grant() {
    let app = TestApp::new();
    app.grant("alice", 4).await;

    let response = app
        .request(
            "POST",
            "/api/sudo/revoke",
            Some(json!({ "principal": "alice", "reason": "done early", "actor": "admin" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Sudo access revoked for alice");
    assert!(!app.artifacts.exists("alice"));
    assert!(app.active_principals().await.is_empty());

    let logs = app.request("GET", "/api/sudo/logs", None).await;
    let entries = logs.body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["action"], "REVOKE");
    assert_eq!(entries[1]["details"], "done early");
    assert_eq!(entries[1]["actor"], "admin");
}

#[tokio::test]
async fn test_revoke_defaults_reason_and_actor() {
    let app = TestApp::new();
    app.grant("bob", 1).await;

    let response = app
        .request("POST", "/api/sudo/revoke", Some(json!({ "username": "bob" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let entries = app.audit.entries();
    let last = entries.last().unwrap();
    assert_eq!(last.details, "Manual revocation");
    assert_eq!(last.actor, "api");
}

#[tokio::test]
async fn test_revoke_without_session() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/sudo/revoke", Some(json!({ "principal": "alice" })))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NO_ACTIVE_SESSION");
    assert_eq!(app.artifacts.remove_count(), 0);
    assert!(app.logged_actions().await.is_empty());
}

#[tokio::test]
async fn test_second_revoke_finds_nothing() {
    let app = TestApp::new();
    app.grant("alice", 1).await;

    let body = Some(json!({ "principal": "alice" }));
    let first = app.request("POST", "/api/sudo/revoke", body.clone()).await;
    let second = app.request("POST", "/api/sudo/revoke", body).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(app.logged_actions().await, vec!["GRANT", "REVOKE"]);
}

#[tokio::test]
async fn test_revoke_removal_failure_keeps_session() {
    let app = TestApp::new();
    app.grant("alice", 1).await;
    app.artifacts.fail_remove_for("alice");

    let response = app
        .request("POST", "/api/sudo/revoke", Some(json!({ "principal": "alice" })))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "ARTIFACT_REMOVAL_ERROR");
    assert_eq!(app.active_principals().await, vec!["alice"]);
    assert_eq!(app.logged_actions().await, vec!["GRANT"]);

    app.artifacts.clear_failures();
    let retry = app
        .request("POST", "/api/sudo/revoke", Some(json!({ "principal": "alice" })))
        .await;
    assert_eq!(retry.status, StatusCode::OK);
}

#[tokio::test]
async fn test_revoke_of_vanished_artifact_succeeds() {
    let app = TestApp::new();
    app.grant("alice", 1).await;
    app.artifacts.erase("alice");

    let response = app
        .request("POST", "/api/sudo/revoke", Some(json!({ "principal": "alice" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logs_return_configured_tail() {
    let mut config = AppConfig::default();
    config.audit.tail_limit = 2;
    let app = TestApp::with_config(config);

    app.grant("alice", 1).await;
    app.grant("bob", 1).await;
    app.request("POST", "/api/sudo/revoke", Some(json!({ "principal": "alice" })))
        .await;

    let logs = app.request("GET", "/api/sudo/logs", None).await;
    let entries = logs.body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["principal"], "bob");
    assert_eq!(entries[1]["action"], "REVOKE");
}

#[tokio::test]
async fn test_logs_read_failure() {
    let app = TestApp::new();
    app.audit.set_failing(true);

    let response = app.request("GET", "/api/sudo/logs", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "AUDIT_READ_ERROR");
}

#[tokio::test]
async fn test_revoke_missing_principal_uses_error_contract() {
    let app = TestApp::new();
    app.grant("alice", 1).await;

    let response = app
        .request("POST", "/api/sudo/revoke", Some(json!({ "reason": "done" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_REQUEST");
    assert_eq!(app.active_principals().await, vec!["alice"]);
}
