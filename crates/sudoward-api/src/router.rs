//! Route definitions for the Sudoward HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route and the request logging middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(system_routes())
        .merge(sudo_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Host account listing
fn system_routes() -> Router<AppState> {
    Router::new().route("/system/users", get(handlers::system::list_users))
}

/// Grant lifecycle and audit trail
fn sudo_routes() -> Router<AppState> {
    Router::new()
        .route("/sudo/grant", post(handlers::sudo::grant))
        .route("/sudo/revoke", post(handlers::sudo::revoke))
        .route("/sudo/active", get(handlers::sudo::active))
        .route("/sudo/logs", get(handlers::sudo::logs))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
