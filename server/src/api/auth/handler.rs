//! Admin login
//!
//! Single fixed admin account from config. The issued token is an opaque
//! marker the admin UI stores client-side; there is no session table and no
//! expiry.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::AppError;

/// Fixed session marker returned on successful login
const SESSION_TOKEN: &str = "admin_session_token";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let config = &state.config;
    if payload.username != config.admin_username || payload.password != config.admin_password {
        tracing::warn!(username = %payload.username, "failed admin login");
        return Err(AppError::invalid_credentials());
    }

    tracing::info!(username = %payload.username, "admin logged in");
    Ok(Json(LoginResponse {
        success: true,
        token: SESSION_TOKEN.to_string(),
    }))
}
