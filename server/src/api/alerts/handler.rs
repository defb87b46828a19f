//! Alert Handlers
//!
//! Alerts are personal: every route reads or writes only the caller's
//! own rows, so no roster scope resolution happens here.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::api::ScopeQuery;
use crate::core::ServerState;
use crate::db::repository::alert;
use crate::utils::{ok, AppResponse, AppResult};
use shared::models::{Alert, AlertDetails};

#[derive(Debug, Serialize)]
pub struct AlertView {
    pub id: i64,
    pub employee_id: i64,
    pub is_read: bool,
    pub created_at: i64,
    pub details: Option<AlertDetails>,
}

impl From<Alert> for AlertView {
    fn from(alert: Alert) -> Self {
        let details = alert.parsed_details();
        Self {
            id: alert.id,
            employee_id: alert.employee_id,
            is_read: alert.is_read,
            created_at: alert.created_at,
            details,
        }
    }
}

/// GET /api/alerts?userId
pub async fn list(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<Vec<AlertView>>> {
    let alerts = alert::find_for_user(&state.pool, scope_query.user_id).await?;
    Ok(Json(alerts.into_iter().map(AlertView::from).collect()))
}

/// GET /api/alerts/unread?userId
pub async fn unread(
    State(state): State<ServerState>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<Vec<AlertView>>> {
    let alerts = alert::find_unread_for_user(&state.pool, scope_query.user_id).await?;
    Ok(Json(alerts.into_iter().map(AlertView::from).collect()))
}

/// POST /api/alerts/:id/read?userId
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(scope_query): Query<ScopeQuery>,
) -> AppResult<Json<AppResponse<()>>> {
    alert::mark_read(&state.pool, id, scope_query.user_id).await?;
    Ok(ok(()))
}
