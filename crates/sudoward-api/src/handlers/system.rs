//! Host account handlers.

use axum::Json;
use axum::extract::State;
use futures::future::join_all;

use crate::dto::response::SystemUserResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/system/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<SystemUserResponse>>, ApiError> {
    let principals = state.probe.list_principals().await?;

    let users = join_all(principals.into_iter().map(|principal| {
        let state = state.clone();
        async move {
            let groups = state.probe.groups(&principal).await;
            let session = state.store.get(&principal);
            SystemUserResponse {
                principal: principal.into(),
                groups,
                has_active_grant: session.is_some(),
                session,
            }
        }
    }))
    .await;

    Ok(Json(users))
}
