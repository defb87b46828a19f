//! Branch Handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::branch;
use crate::utils::{AppError, AppResult};
use shared::models::Branch;

/// GET /api/branches
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Branch>>> {
    let branches = branch::find_all(&state.pool).await?;
    Ok(Json(branches))
}

#[derive(Debug, Deserialize)]
pub struct BranchCreate {
    pub name: String,
}

/// POST /api/branches
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BranchCreate>,
) -> AppResult<Json<Branch>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Branch name is required"));
    }
    let created = branch::create(&state.pool, name).await?;
    Ok(Json(created))
}
