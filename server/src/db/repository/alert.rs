//! Alert Repository

use super::{RepoError, RepoResult};
use shared::models::{Alert, AlertDetails};
use sqlx::SqlitePool;

const ALERT_SELECT: &str =
    "SELECT id, user_id, employee_id, month, year, details, is_read, created_at FROM alerts";

/// Insert an alert unless one already exists for the
/// (recipient, employee, month, year) key. Returns whether a row was
/// inserted — the unique index makes re-crossing the threshold within
/// one month a no-op.
pub async fn insert_if_absent(
    pool: &SqlitePool,
    user_id: i64,
    employee_id: i64,
    month: u32,
    year: i32,
    details: &AlertDetails,
) -> RepoResult<bool> {
    let json = serde_json::to_string(details)
        .map_err(|e| RepoError::Database(format!("Failed to encode alert details: {e}")))?;
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "INSERT INTO alerts (user_id, employee_id, month, year, details, is_read, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6) \
         ON CONFLICT(user_id, employee_id, month, year) DO NOTHING",
    )
    .bind(user_id)
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .bind(&json)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(rows.rows_affected() > 0)
}

pub async fn find_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Alert>> {
    let sql = format!("{ALERT_SELECT} WHERE user_id = ? ORDER BY created_at DESC");
    let alerts = sqlx::query_as::<_, Alert>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(alerts)
}

pub async fn find_unread_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Alert>> {
    let sql = format!("{ALERT_SELECT} WHERE user_id = ? AND is_read = 0 ORDER BY created_at DESC");
    let alerts = sqlx::query_as::<_, Alert>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(alerts)
}

/// Mark one of the recipient's own alerts as read. Alerts of other
/// recipients are invisible here, so a wrong user yields NotFound.
pub async fn mark_read(pool: &SqlitePool, alert_id: i64, user_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE alerts SET is_read = 1 WHERE id = ? AND user_id = ?")
        .bind(alert_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Alert {alert_id} not found")));
    }
    Ok(())
}
