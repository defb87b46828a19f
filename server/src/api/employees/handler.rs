//! Employee Handlers
//!
//! The employee catalog is organization-wide; visibility of attendance
//! and report data is scoped through the roster, not here.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::{ok, AppError, AppResponse, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, EmployeeWithBranch};

/// GET /api/employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeWithBranch>>> {
    let employees = employee::find_all(&state.pool).await?;
    Ok(Json(employees))
}

/// GET /api/employees/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let found = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/employees
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    let created = employee::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/employees/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let updated = employee::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/employees/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    if !employee::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Employee {id} not found")));
    }
    Ok(ok(()))
}
