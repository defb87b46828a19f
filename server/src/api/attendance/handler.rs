//! Attendance Handlers
//!
//! Everything here is scoped: the caller's `userId` resolves to the set
//! of roster owners they may see, and every read filters on it. Writes
//! additionally require the target employee's roster owner to be inside
//! that set.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{authorized_scope, require_scope, ScopeQuery};
use crate::compliance::delays;
use crate::core::ServerState;
use crate::db::repository::{attendance, roster};
use crate::utils::time;
use crate::utils::{ok, AppError, AppResponse, AppResult};
use shared::models::{AttendanceMark, AttendanceRecord, AttendanceStatus, RosterAdd, RosterEmployee};

/// Reject unless the employee sits on a roster owned by the scope.
async fn authorize_employee(
    state: &ServerState,
    scope: &[i64],
    employee_id: i64,
) -> AppResult<()> {
    match roster::owner_of(&state.pool, employee_id).await? {
        Some(owner) if scope.contains(&owner) => Ok(()),
        Some(_) => Err(AppError::forbidden(format!(
            "Employee {employee_id} is outside your roster scope"
        ))),
        None => Err(AppError::forbidden(format!(
            "Employee {employee_id} is not on any roster"
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Zero-based month, as the frontend sends it.
    pub month: i64,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct MonthView {
    pub employees: Vec<RosterEmployee>,
    pub records: Vec<AttendanceRecord>,
}

/// GET /api/attendance?userId&month&year
///
/// The month grid: every roster member in scope plus all their records
/// for the month.
pub async fn month_view(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<MonthView>> {
    let month = time::month_from_external(query.month)?;
    let scope = authorized_scope(&state.pool, query.user_id).await?;

    let employees = roster::members_for_owners(&state.pool, &scope).await?;
    let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
    let pattern = time::month_pattern(query.year, month);
    let records = attendance::find_for_employees(&state.pool, &ids, Some(&pattern)).await?;

    Ok(Json(MonthView { employees, records }))
}

/// POST /api/attendance?userId
///
/// Full-replace upsert for one (employee, date). Status `none` deletes
/// the mark. A `delay` mark triggers the alert engine inline; alerting
/// failures are logged and absorbed.
pub async fn mark(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
    Json(payload): Json<AttendanceMark>,
) -> AppResult<Json<AppResponse<AttendanceStatus>>> {
    let scope = require_scope(&state.pool, scope_query.user_id).await?;
    authorize_employee(&state, &scope, payload.employee_id).await?;
    time::parse_date(&payload.date)?;

    let employee_id = payload.employee_id;
    let date = payload.date.clone();
    let stored = attendance::mark(&state.pool, &payload).await?;

    if stored == AttendanceStatus::Delay {
        if let Err(e) = delays::on_delay_marked(&state.pool, employee_id, &date).await {
            tracing::warn!(employee_id, date = %date, error = %e, "Delay alerting failed");
        }
    }

    Ok(ok(stored))
}

/// DELETE /api/attendance/:id?userId
pub async fn delete_record(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<AppResponse<()>>> {
    let scope = require_scope(&state.pool, scope_query.user_id).await?;
    let record = attendance::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Attendance record {id} not found")))?;
    authorize_employee(&state, &scope, record.employee_id).await?;

    attendance::delete(&state.pool, id).await?;
    Ok(ok(()))
}

/// GET /api/attendance/roster?userId
pub async fn roster_list(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<Vec<RosterEmployee>>> {
    let scope = authorized_scope(&state.pool, scope_query.user_id).await?;
    let members = roster::members_for_owners(&state.pool, &scope).await?;
    Ok(Json(members))
}

/// POST /api/attendance/roster
///
/// Claim an employee into a roster. An employee belongs to exactly one
/// roster; re-adding moves them.
pub async fn roster_add(
    State(state): State<ServerState>,
    Json(payload): Json<RosterAdd>,
) -> AppResult<Json<AppResponse<()>>> {
    require_scope(&state.pool, payload.user_id).await?;
    roster::add(&state.pool, payload.employee_id, payload.user_id).await?;
    Ok(ok(()))
}

/// DELETE /api/attendance/roster/:employee_id?userId
pub async fn roster_remove(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<AppResponse<()>>> {
    let scope = require_scope(&state.pool, scope_query.user_id).await?;
    authorize_employee(&state, &scope, employee_id).await?;

    if !roster::remove(&state.pool, employee_id).await? {
        return Err(AppError::not_found(format!(
            "Employee {employee_id} is not on any roster"
        )));
    }
    Ok(ok(()))
}

#[derive(Debug, Serialize)]
pub struct ArchivedMonth {
    /// Zero-based, matching the frontend convention.
    pub month: i64,
    pub year: i64,
    pub record_count: i64,
}

/// GET /api/attendance/archived-months
pub async fn archived_months(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ArchivedMonth>>> {
    let months = attendance::archived_months(&state.pool)
        .await?
        .into_iter()
        .map(|(year, month, record_count)| ArchivedMonth {
            month: time::month_to_external(month as u32),
            year,
            record_count,
        })
        .collect();
    Ok(Json(months))
}
