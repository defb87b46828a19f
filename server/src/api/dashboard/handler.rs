//! Dashboard Handlers
//!
//! Read-only aggregates over the caller's roster scope. Everything is
//! computed against today's date on the server clock.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::api::{authorized_scope, ScopeQuery};
use crate::compliance::score::StatusCounters;
use crate::core::ServerState;
use crate::db::repository::{alert, attendance, incident, roster};
use crate::utils::{time, AppResult};
use shared::models::{AttendanceStatus, IncidentWithNames};
use shared::util::today_iso;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub roster_count: i64,
    pub active_incidents: i64,
    pub unread_alerts: usize,
    pub month_attendance_records: usize,
    pub today: StatusCounters,
}

/// GET /api/dashboard/stats?userId
pub async fn stats(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<DashboardStats>> {
    let scope = authorized_scope(&state.pool, scope_query.user_id).await?;
    let members = roster::members_for_owners(&state.pool, &scope).await?;
    let ids: Vec<i64> = members.iter().map(|m| m.id).collect();

    let today = today_iso();
    let (year, month) = time::year_month_of(&today)?;
    let pattern = time::month_pattern(year, month);

    let month_records =
        attendance::find_for_employees(&state.pool, &ids, Some(&pattern)).await?;
    let today_records = attendance::find_on_date(&state.pool, &ids, &today).await?;

    Ok(Json(DashboardStats {
        roster_count: roster::count_for_owners(&state.pool, &scope).await?,
        active_incidents: incident::count_active_for_owners(&state.pool, &scope).await?,
        unread_alerts: alert::find_unread_for_user(&state.pool, scope_query.user_id)
            .await?
            .len(),
        month_attendance_records: month_records.len(),
        today: StatusCounters::of(&today_records),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceView {
    pub employee_id: i64,
    pub full_name: String,
    pub status: AttendanceStatus,
    pub comment: Option<String>,
}

/// GET /api/dashboard/absences?userId
///
/// Today's absent and delayed roster members, with names.
pub async fn absences(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<Vec<AbsenceView>>> {
    let scope = authorized_scope(&state.pool, scope_query.user_id).await?;
    let members = roster::members_for_owners(&state.pool, &scope).await?;
    let names: HashMap<i64, &str> = members
        .iter()
        .map(|m| (m.id, m.full_name.as_str()))
        .collect();
    let ids: Vec<i64> = members.iter().map(|m| m.id).collect();

    let today = today_iso();
    let views = attendance::find_on_date(&state.pool, &ids, &today)
        .await?
        .into_iter()
        .filter(|r| matches!(r.status, AttendanceStatus::Absent | AttendanceStatus::Delay))
        .map(|r| AbsenceView {
            employee_id: r.employee_id,
            full_name: names
                .get(&r.employee_id)
                .map(|n| n.to_string())
                .unwrap_or_default(),
            status: r.status,
            comment: r.comment,
        })
        .collect();
    Ok(Json(views))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRangeView {
    pub employee_id: i64,
    pub full_name: String,
    pub status: AttendanceStatus,
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/dashboard/active-ranges?userId
///
/// Vacation/permission/incapacity spans covering today.
pub async fn active_ranges(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<Vec<ActiveRangeView>>> {
    let scope = authorized_scope(&state.pool, scope_query.user_id).await?;
    let members = roster::members_for_owners(&state.pool, &scope).await?;
    let names: HashMap<i64, &str> = members
        .iter()
        .map(|m| (m.id, m.full_name.as_str()))
        .collect();
    let ids: Vec<i64> = members.iter().map(|m| m.id).collect();

    let today = today_iso();
    let views = attendance::find_active_ranges(&state.pool, &ids, &today)
        .await?
        .into_iter()
        .map(|r| ActiveRangeView {
            employee_id: r.employee_id,
            full_name: names
                .get(&r.employee_id)
                .map(|n| n.to_string())
                .unwrap_or_default(),
            status: r.status,
            start_date: r.start_date.unwrap_or_default(),
            end_date: r.end_date.unwrap_or_default(),
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/dashboard/active-incidents?userId
pub async fn active_incidents(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<Vec<IncidentWithNames>>> {
    let scope = authorized_scope(&state.pool, scope_query.user_id).await?;
    let incidents = incident::find_active_for_owners(&state.pool, &scope)
        .await?
        .into_iter()
        .map(IncidentWithNames::normalized)
        .collect();
    Ok(Json(incidents))
}
