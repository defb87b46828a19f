//! Report Handlers
//!
//! Report documents are keyed by (employee, month, year). Months cross
//! the HTTP boundary zero-based and are converted exactly once, here.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{authorized_scope, require_scope, ScopeQuery};
use crate::core::ServerState;
use crate::db::repository::{report, roster};
use crate::utils::time;
use crate::utils::{ok, AppError, AppResponse, AppResult};
use shared::models::{ReportCellUpdate, ReportData};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Zero-based month.
    pub month: i64,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub employee_id: i64,
    /// Zero-based month.
    pub month: i64,
    pub year: i64,
    pub data: ReportData,
}

async fn authorize_employee(
    state: &ServerState,
    scope: &[i64],
    employee_id: i64,
) -> AppResult<()> {
    match roster::owner_of(&state.pool, employee_id).await? {
        Some(owner) if scope.contains(&owner) => Ok(()),
        _ => Err(AppError::forbidden(format!(
            "Employee {employee_id} is outside your roster scope"
        ))),
    }
}

/// GET /api/reports?userId&month&year
///
/// Every report document in the month for the caller's roster scope.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<ReportView>>> {
    let month = time::month_from_external(query.month)?;
    let scope = authorized_scope(&state.pool, query.user_id).await?;

    let members = roster::members_for_owners(&state.pool, &scope).await?;
    let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
    let reports = report::find_for_employees(&state.pool, &ids, month, query.year).await?;

    let views = reports
        .into_iter()
        .map(|r| ReportView {
            employee_id: r.employee_id,
            month: time::month_to_external(r.month as u32),
            year: r.year,
            data: r.parsed_data(),
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/reports/:employee_id?userId&month&year
///
/// One document; an absent row is an empty document, not a 404.
pub async fn get_one(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ReportView>> {
    let month = time::month_from_external(query.month)?;
    let scope = require_scope(&state.pool, query.user_id).await?;
    authorize_employee(&state, &scope, employee_id).await?;

    let data = report::find_by_key(&state.pool, employee_id, month, query.year)
        .await?
        .map(|r| r.parsed_data())
        .unwrap_or_default();

    Ok(Json(ReportView {
        employee_id,
        month: query.month,
        year: query.year as i64,
        data,
    }))
}

/// POST /api/reports/cell?userId
///
/// Merge-patch one cell. Status `"empty"` clears the slot.
pub async fn patch_cell(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
    Json(payload): Json<ReportCellUpdate>,
) -> AppResult<Json<AppResponse<()>>> {
    let month = time::month_from_external(payload.month)?;
    let scope = require_scope(&state.pool, scope_query.user_id).await?;
    authorize_employee(&state, &scope, payload.employee_id).await?;

    if payload.key.trim().is_empty() {
        return Err(AppError::validation("Report cell key is required"));
    }

    report::patch_cell(
        &state.pool,
        payload.employee_id,
        month,
        payload.year as i32,
        payload.section,
        &payload.key,
        &payload.status,
        payload.comment,
    )
    .await?;
    Ok(ok(()))
}

#[derive(Debug, Deserialize)]
pub struct ReportReplace {
    pub employee_id: i64,
    /// Zero-based month.
    pub month: i64,
    pub year: i64,
    pub data: ReportData,
}

/// POST /api/reports?userId — full-document replace.
pub async fn replace(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
    Json(payload): Json<ReportReplace>,
) -> AppResult<Json<AppResponse<()>>> {
    let month = time::month_from_external(payload.month)?;
    let scope = require_scope(&state.pool, scope_query.user_id).await?;
    authorize_employee(&state, &scope, payload.employee_id).await?;

    report::upsert(
        &state.pool,
        payload.employee_id,
        month,
        payload.year as i32,
        &payload.data,
    )
    .await?;
    Ok(ok(()))
}

#[derive(Debug, Serialize)]
pub struct ArchivedMonth {
    /// Zero-based.
    pub month: i64,
    pub year: i64,
    pub record_count: i64,
}

/// GET /api/reports/archived-months
pub async fn archived_months(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ArchivedMonth>>> {
    let months = report::archived_months(&state.pool)
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
