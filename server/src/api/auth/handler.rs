//! Authentication Handlers

use std::time::Duration;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};
use shared::models::PublicUser;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login
///
/// Verifies credentials and returns the public user shape, including
/// the supervised tutor ids an admin scopes over.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<PublicUser>> {
    let account = user::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let account = match account {
        Some(u) if user::verify_password(&u.password_hash, &req.password) => u,
        _ => {
            tracing::warn!(username = %req.username, "Login failed");
            return Err(AppError::invalid_credentials());
        }
    };

    let supervised_user_ids = if account.is_admin() {
        user::supervised_tutor_ids(&state.pool, account.id).await?
    } else {
        Vec::new()
    };

    tracing::info!(username = %account.username, role = %account.role, "Login successful");

    Ok(Json(PublicUser {
        id: account.id,
        username: account.username,
        role: account.role,
        branch_id: account.branch_id,
        supervisor_id: account.supervisor_id,
        supervised_user_ids,
    }))
}
