//! Integration tests for automatic expiry.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use sudoward_worker::SweepReport;

use helpers::{TestApp, t0};

#[tokio::test]
async fn test_expired_grant_is_auto_revoked() {
    let app = TestApp::new();
    app.grant("alice", 4).await;
    let sweeper = app.sweeper();

    let early = sweeper.sweep_once(t0() + Duration::hours(3)).await;
    assert_eq!(early.revoked, 0);
    assert_eq!(app.active_principals().await, vec!["alice"]);

    let report = sweeper.sweep_once(t0() + Duration::hours(4)).await;
    assert_eq!(
        report,
        SweepReport {
            examined: 1,
            revoked: 1,
            failed: 0
        }
    );

    assert!(app.active_principals().await.is_empty());
    assert!(!app.artifacts.exists("alice"));
    assert_eq!(app.logged_actions().await, vec!["GRANT", "AUTO_REVOKE"]);

    let logs = app.request("GET", "/api/sudo/logs", None).await;
    assert_eq!(logs.body[1]["actor"], "scheduler");
    assert_eq!(logs.body[1]["details"], "expired");
}

#[tokio::test]
async fn test_sweep_skips_unexpired_and_regranted() {
    let app = TestApp::new();
    app.grant("alice", 1).await;
    app.grant("bob", 5).await;
    let sweeper = app.sweeper();

    app.clock.set(t0() + Duration::minutes(50));
    app.grant("alice", 2).await;

    let report = sweeper.sweep_once(t0() + Duration::hours(2)).await;
    assert_eq!(report.revoked, 0);
    assert_eq!(app.active_principals().await, vec!["alice", "bob"]);
}

#[tokio::test]
async fn test_sweep_failure_is_retried() {
    let app = TestApp::new();
    app.grant("alice", 1).await;
    app.artifacts.fail_remove_for("alice");
    let sweeper = app.sweeper();
    let later = t0() + Duration::hours(2);

    let report = sweeper.sweep_once(later).await;
    assert_eq!(report.failed, 1);
    assert_eq!(app.active_principals().await, vec!["alice"]);
    assert_eq!(app.logged_actions().await, vec!["GRANT"]);

    app.artifacts.clear_failures();
    let report = sweeper.sweep_once(later).await;
    assert_eq!(report.revoked, 1);
    assert_eq!(app.logged_actions().await, vec!["GRANT", "AUTO_REVOKE"]);
}

#[tokio::test]
async fn test_manual_revoke_after_sweep_finds_nothing() {
    let app = TestApp::new();
    app.grant("bob", 1).await;
    app.sweeper().sweep_once(t0() + Duration::hours(1)).await;

    let response = app
        .request("POST", "/api/sudo/revoke", Some(json!({ "principal": "bob" })))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.logged_actions().await, vec!["GRANT", "AUTO_REVOKE"]);
}
