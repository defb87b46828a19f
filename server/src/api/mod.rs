//! API Route Modules
//!
//! One module per domain, each exposing `router() -> Router<ServerState>`
//! nested under its `/api/...` prefix:
//!
//! - [`health`] - liveness probe
//! - [`auth`] - login
//! - [`branches`] - branch catalog
//! - [`employees`] - employee CRUD
//! - [`attendance`] - daily marks, roster, archived months
//! - [`incidents`] - incident lifecycle
//! - [`reports`] - monthly report documents
//! - [`dashboard`] - scoped aggregates
//! - [`alerts`] - accumulated-delay notifications
//! - [`scores`] - monthly compliance scores
//!
//! Callers identify themselves with a `userId` query parameter; every
//! scoped handler resolves it to an authorized set of roster owners
//! before touching data.

pub mod alerts;
pub mod attendance;
pub mod auth;
pub mod branches;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod incidents;
pub mod reports;
pub mod scores;

use serde::Deserialize;
use sqlx::SqlitePool;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use crate::db::repository::user;
use crate::utils::AppError;

/// Caller identity carried on scoped endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScopeQuery {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Resolve the caller to the roster owners they may see. An unknown
/// caller resolves to the empty set, which list endpoints treat as
/// "no rows".
pub(crate) async fn authorized_scope(pool: &SqlitePool, caller_id: i64) -> AppResult<Vec<i64>> {
    Ok(user::resolve_authorized_ids(pool, caller_id).await?)
}

/// Like [`authorized_scope`] but rejects unknown callers. Used by
/// single-resource operations, where an empty scope means the caller
/// cannot act at all.
pub(crate) async fn require_scope(pool: &SqlitePool, caller_id: i64) -> AppResult<Vec<i64>> {
    let scope = authorized_scope(pool, caller_id).await?;
    if scope.is_empty() {
        return Err(AppError::forbidden(format!("Unknown user {caller_id}")));
    }
    Ok(scope)
}
