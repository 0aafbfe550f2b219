//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    domain::{UserId, Username},
    infrastructure::dto::http::{BindIdentityRequest, UsernameQuery, UsernameResponse},
};

use super::super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Full persisted history as `"<username>: <message>"` lines, oldest first.
///
/// Served to clients at join time, before they start consuming the live
/// channel; the lines are identical to what the fan-out delivers.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, StatusCode> {
    match state.replay_history_usecase.execute().await {
        Ok(lines) => Ok(Json(lines)),
        Err(e) => {
            tracing::error!("Failed to replay history: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Resolve a user id to its username.
///
/// Unknown ids are not an error: the response carries the `"unknown"`
/// sentinel and a 200 status.
pub async fn get_username(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<UsernameResponse>, StatusCode> {
    let user_id = match UserId::new(query.user_id) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::warn!("Invalid userID query parameter: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let username = state.identity.resolve(&user_id).await;
    Ok(Json(UsernameResponse {
        username: username.into_string(),
    }))
}

/// Bind a username to a user id (the auth-surface adapter).
pub async fn bind_identity(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BindIdentityRequest>,
) -> Result<StatusCode, StatusCode> {
    let user_id = UserId::new(request.user_id).map_err(|e| {
        tracing::warn!("Invalid userID in bind request: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    let username = Username::new(request.username).map_err(|e| {
        tracing::warn!("Invalid username in bind request: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    state.identity.bind(user_id, username).await;
    Ok(StatusCode::CREATED)
}
