//! HTTP API request/response shapes.

use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/username`.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    #[serde(rename = "userID")]
    pub user_id: String,
}

/// Response body of `GET /api/username`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UsernameResponse {
    pub username: String,
}

/// Request body of `POST /api/identity` (the auth-surface bind adapter).
#[derive(Debug, Deserialize)]
pub struct BindIdentityRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
}
