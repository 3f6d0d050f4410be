//! Grant, revoke and inspection handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use sudoward_core::error::AppError;
use sudoward_core::types::{AuditEntry, Principal, Session};

use crate::dto::request::{GrantRequest, RevokeRequest};
use crate::dto::response::{GrantResponse, RevokeResponse};
use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::state::AppState;

/// Actor recorded when the caller does not name one.
pub const DEFAULT_ACTOR: &str = "api";

/// Reason recorded when a manual revoke does not give one.
pub const DEFAULT_REVOKE_REASON: &str = "Manual revocation";

/// POST /api/sudo/grant
///
/// The grant runs on its own task so a client disconnect cannot stop it
/// between the host change and the store commit.
pub async fn grant(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<GrantRequest>,
) -> Result<Json<GrantResponse>, ApiError> {
    let principal = Principal::parse(&req.principal)?;
    let actor = req.actor.clone().unwrap_or_else(|| DEFAULT_ACTOR.to_string());

    let grants = Arc::clone(&state.grants);
    let request_id = req.request_id.clone();
    let duration_hours = req.duration_hours;
    let session = {
        let principal = principal.clone();
        tokio::spawn(async move {
            grants
                .grant(&principal, duration_hours, request_id.as_deref(), &actor)
                .await
        })
        .await
        .map_err(|e| AppError::internal(format!("Grant task failed: {e}")))??
    };

    Ok(Json(GrantResponse {
        success: true,
        message: format!(
            "Sudo access granted to {principal} for {} hours",
            req.duration_hours
        ),
        expires_at: session.expires_at,
    }))
}

/// POST /api/sudo/revoke
pub async fn revoke(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RevokeRequest>,
) -> Result<Json<RevokeResponse>, ApiError> {
    let principal = Principal::parse(&req.principal)?;
    let actor = req.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
    let reason = req
        .reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REVOKE_REASON.to_string());

    let revokes = Arc::clone(&state.revokes);
    {
        let principal = principal.clone();
        tokio::spawn(async move { revokes.revoke(&principal, &actor, &reason).await })
            .await
            .map_err(|e| AppError::internal(format!("Revoke task failed: {e}")))??;
    }

    Ok(Json(RevokeResponse {
        success: true,
        message: format!("Sudo access revoked for {principal}"),
    }))
}

/// GET /api/sudo/active
pub async fn active(State(state): State<AppState>) -> Json<Vec<Session>> {
    Json(
        state
            .store
            .list()
            .into_iter()
            .map(|(_, session)| session)
            .collect(),
    )
}

/// GET /api/sudo/logs
pub async fn logs(State(state): State<AppState>) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    let entries = state.audit.recent(state.config.audit.tail_limit).await?;
    Ok(Json(entries))
}
