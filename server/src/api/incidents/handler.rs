//! Incident Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::repository::incident;
use crate::utils::time;
use crate::utils::{ok, AppError, AppResponse, AppResult};
use shared::models::{IncidentCreate, IncidentUpdate, IncidentWithNames};

fn validate_payload(
    incident_type: &str,
    status: &str,
    start_date: Option<String>,
    end_date: Option<String>,
) -> AppResult<(Option<String>, Option<String>)> {
    if incident_type.trim().is_empty() {
        return Err(AppError::validation("Incident type is required"));
    }
    if status.trim().is_empty() {
        return Err(AppError::validation("Incident status is required"));
    }
    let start = time::normalize_optional_date(start_date)?;
    let end = time::normalize_optional_date(end_date)?;
    Ok((start, end))
}

/// GET /api/incidents
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<IncidentWithNames>>> {
    let incidents = incident::find_all(&state.pool)
        .await?
        .into_iter()
        .map(IncidentWithNames::normalized)
        .collect();
    Ok(Json(incidents))
}

/// POST /api/incidents
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<IncidentCreate>,
) -> AppResult<Json<AppResponse<i64>>> {
    let (start, end) = validate_payload(
        &payload.incident_type,
        &payload.status,
        payload.start_date.take(),
        payload.end_date.take(),
    )?;
    payload.start_date = start;
    payload.end_date = end;

    let id = incident::create(&state.pool, payload).await?;
    Ok(ok(id))
}

/// PUT /api/incidents/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<IncidentUpdate>,
) -> AppResult<Json<AppResponse<()>>> {
    let (start, end) = validate_payload(
        &payload.incident_type,
        &payload.status,
        payload.start_date.take(),
        payload.end_date.take(),
    )?;
    payload.start_date = start;
    payload.end_date = end;

    incident::update(&state.pool, id, payload).await?;
    Ok(ok(()))
}

/// DELETE /api/incidents/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    if !incident::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Incident {id} not found")));
    }
    Ok(ok(()))
}
