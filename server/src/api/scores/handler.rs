//! Score Handlers
//!
//! Handlers assemble the scorer's inputs (business days from the
//! holiday provider, attendance and report rows from the repositories)
//! and hand them to the pure functions in `compliance::score`.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::authorized_scope;
use crate::compliance::calendar::business_days;
use crate::compliance::score::{employee_score, tutor_score, EmployeeScore, ScorePolicy, TutorScore};
use crate::core::ServerState;
use crate::db::repository::{attendance, report, roster, user};
use crate::utils::{time, AppResult};
use chrono::NaiveDate;
use shared::models::{AttendanceRecord, ReportData, RosterEmployee};

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Zero-based month.
    pub month: i64,
    pub year: i32,
}

struct MonthInputs {
    days: Vec<NaiveDate>,
    members: Vec<RosterEmployee>,
    records_by_employee: HashMap<i64, Vec<AttendanceRecord>>,
    reports_by_employee: HashMap<i64, ReportData>,
}

async fn month_inputs(state: &ServerState, query: &ScoreQuery) -> AppResult<MonthInputs> {
    let month = time::month_from_external(query.month)?;
    let scope = authorized_scope(&state.pool, query.user_id).await?;

    let holidays = state.holidays.holidays_for_year(query.year).await;
    let days = business_days(query.year, month, &holidays);

    let members = roster::members_for_owners(&state.pool, &scope).await?;
    let ids: Vec<i64> = members.iter().map(|m| m.id).collect();

    let pattern = time::month_pattern(query.year, month);
    let mut records_by_employee: HashMap<i64, Vec<AttendanceRecord>> = HashMap::new();
    for record in attendance::find_for_employees(&state.pool, &ids, Some(&pattern)).await? {
        records_by_employee
            .entry(record.employee_id)
            .or_default()
            .push(record);
    }

    let reports_by_employee = report::find_for_employees(&state.pool, &ids, month, query.year)
        .await?
        .into_iter()
        .map(|r| (r.employee_id, r.parsed_data()))
        .collect();

    Ok(MonthInputs {
        days,
        members,
        records_by_employee,
        reports_by_employee,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeScoreView {
    pub employee_id: i64,
    pub full_name: String,
    #[serde(flatten)]
    pub score: EmployeeScore,
}

/// GET /api/scores/employees?userId&month&year
pub async fn employee_scores(
    State(state): State<ServerState>,
    Query(query): Query<ScoreQuery>,
) -> AppResult<Json<Vec<EmployeeScoreView>>> {
    let inputs = month_inputs(&state, &query).await?;
    let policy = ScorePolicy::default();

    let views = inputs
        .members
        .iter()
        .map(|m| EmployeeScoreView {
            employee_id: m.id,
            full_name: m.full_name.clone(),
            score: employee_score(
                &policy,
                &inputs.days,
                inputs
                    .records_by_employee
                    .get(&m.id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
                inputs.reports_by_employee.get(&m.id),
            ),
        })
        .collect();
    Ok(Json(views))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorScoreView {
    pub user_id: i64,
    pub username: String,
    #[serde(flatten)]
    pub score: TutorScore,
}

/// GET /api/scores/tutors?userId&month&year
///
/// One row per roster owner in scope: a tutor sees their own score, an
/// admin sees themselves plus every supervised tutor.
pub async fn tutor_scores(
    State(state): State<ServerState>,
    Query(query): Query<ScoreQuery>,
) -> AppResult<Json<Vec<TutorScoreView>>> {
    let month = time::month_from_external(query.month)?;
    let scope = authorized_scope(&state.pool, query.user_id).await?;

    let holidays = state.holidays.holidays_for_year(query.year).await;
    let days = business_days(query.year, month, &holidays);
    let pattern = time::month_pattern(query.year, month);
    let policy = ScorePolicy::default();

    let mut views = Vec::with_capacity(scope.len());
    for owner_id in scope {
        let Some(owner) = user::find_by_id(&state.pool, owner_id).await? else {
            continue;
        };

        let members = roster::members_for_owners(&state.pool, &[owner_id]).await?;
        let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
        let records =
            attendance::find_for_employees(&state.pool, &ids, Some(&pattern)).await?;
        let reports: Vec<ReportData> = report::find_for_employees(&state.pool, &ids, month, query.year)
            .await?
            .iter()
            .map(|r| r.parsed_data())
            .collect();

        views.push(TutorScoreView {
            user_id: owner_id,
            username: owner.username,
            score: tutor_score(&policy, &days, members.len(), &records, &reports),
        });
    }
    Ok(Json(views))
}

#[derive(Debug, Serialize)]
pub struct ScoreExport {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// GET /api/scores/export?userId&month&year
///
/// Exporter-ready tabular rows; the workbook itself is written by an
/// external sink.
pub async fn export(
    State(state): State<ServerState>,
    Query(query): Query<ScoreQuery>,
) -> AppResult<Json<ScoreExport>> {
    let inputs = month_inputs(&state, &query).await?;
    let policy = ScorePolicy::default();

    let rows = inputs
        .members
        .iter()
        .map(|m| {
            let score = employee_score(
                &policy,
                &inputs.days,
                inputs
                    .records_by_employee
                    .get(&m.id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
                inputs.reports_by_employee.get(&m.id),
            );
            vec![
                m.full_name.clone(),
                format!("{}/{}", score.covered_days, score.business_days),
                format!("{}/{}", score.complete_cells, score.expected_cells),
                format!("{:.1}", score.attendance_score),
                format!("{:.1}", score.report_score),
                format!("{:.1}", score.total),
                score.band.to_string(),
            ]
        })
        .collect();

    Ok(Json(ScoreExport {
        headers: vec![
            "Employee",
            "Days covered",
            "Report cells",
            "Attendance score",
            "Report score",
            "Total",
            "Band",
        ],
        rows,
    }))
}
