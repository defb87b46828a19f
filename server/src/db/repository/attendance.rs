//! Attendance Repository
//!
//! Source of truth for daily marks. One record per (employee, date);
//! writes are full-replace upserts and the `none` sentinel deletes.

use super::{RepoError, RepoResult};
use crate::utils::time;
use shared::models::{AttendanceMark, AttendanceRecord, AttendanceStatus};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const ATTENDANCE_SELECT: &str = "SELECT id, employee_id, date, status, comment, arrival_time, permission_type, start_date, end_date, created_at FROM attendance";

/// Upsert-or-delete a daily mark.
///
/// Status `none` removes any record for the (employee, date) key.
/// Otherwise all fields are overwritten — last write wins, no merging.
/// Optional range dates normalize empty strings to NULL; anything else
/// must parse. Returns the stored status so callers can trigger the
/// delay alert engine on `delay`.
pub async fn mark(pool: &SqlitePool, data: &AttendanceMark) -> RepoResult<AttendanceStatus> {
    if data.status == AttendanceStatus::None {
        sqlx::query("DELETE FROM attendance WHERE employee_id = ?1 AND date = ?2")
            .bind(data.employee_id)
            .bind(&data.date)
            .execute(pool)
            .await?;
        return Ok(AttendanceStatus::None);
    }

    let start_date = time::normalize_optional_date(data.start_date.clone())
        .map_err(|e| RepoError::Validation(e.to_string()))?;
    let end_date = time::normalize_optional_date(data.end_date.clone())
        .map_err(|e| RepoError::Validation(e.to_string()))?;

    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO attendance (employee_id, date, status, comment, arrival_time, permission_type, start_date, end_date, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
         ON CONFLICT(employee_id, date) DO UPDATE SET \
             status = excluded.status, \
             comment = excluded.comment, \
             arrival_time = excluded.arrival_time, \
             permission_type = excluded.permission_type, \
             start_date = excluded.start_date, \
             end_date = excluded.end_date",
    )
    .bind(data.employee_id)
    .bind(&data.date)
    .bind(data.status)
    .bind(&data.comment)
    .bind(&data.arrival_time)
    .bind(&data.permission_type)
    .bind(&start_date)
    .bind(&end_date)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(data.status)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AttendanceRecord>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE id = ?");
    let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(record)
}

pub async fn find_by_key(
    pool: &SqlitePool,
    employee_id: i64,
    date: &str,
) -> RepoResult<Option<AttendanceRecord>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE employee_id = ? AND date = ?");
    let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(employee_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;
    Ok(record)
}

/// All records for the given employees, optionally narrowed to one
/// month (`YYYY-MM-%` pattern), newest first.
pub async fn find_for_employees(
    pool: &SqlitePool,
    employee_ids: &[i64],
    month_pattern: Option<&str>,
) -> RepoResult<Vec<AttendanceRecord>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(ATTENDANCE_SELECT);
    qb.push(" WHERE employee_id IN (");
    let mut separated = qb.separated(", ");
    for id in employee_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");
    if let Some(pattern) = month_pattern {
        qb.push(" AND date LIKE ").push_bind(pattern);
    }
    qb.push(" ORDER BY date DESC");

    let records = qb
        .build_query_as::<AttendanceRecord>()
        .fetch_all(pool)
        .await?;
    Ok(records)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Attendance record {id} not found"
        )));
    }
    Ok(true)
}

/// Records for the given employees on one exact date.
pub async fn find_on_date(
    pool: &SqlitePool,
    employee_ids: &[i64],
    date: &str,
) -> RepoResult<Vec<AttendanceRecord>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(ATTENDANCE_SELECT);
    qb.push(" WHERE date = ").push_bind(date);
    qb.push(" AND employee_id IN (");
    let mut separated = qb.separated(", ");
    for id in employee_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let records = qb
        .build_query_as::<AttendanceRecord>()
        .fetch_all(pool)
        .await?;
    Ok(records)
}

/// Multi-day vacation/permission/incapacity spans covering `date`.
pub async fn find_active_ranges(
    pool: &SqlitePool,
    employee_ids: &[i64],
    date: &str,
) -> RepoResult<Vec<AttendanceRecord>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(ATTENDANCE_SELECT);
    qb.push(" WHERE status IN ('vacation', 'permission', 'incapacity')");
    qb.push(" AND start_date IS NOT NULL AND end_date IS NOT NULL");
    qb.push(" AND start_date <= ").push_bind(date);
    qb.push(" AND end_date >= ").push_bind(date);
    qb.push(" AND employee_id IN (");
    let mut separated = qb.separated(", ");
    for id in employee_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(") ORDER BY start_date ASC");

    let records = qb
        .build_query_as::<AttendanceRecord>()
        .fetch_all(pool)
        .await?;
    Ok(records)
}

/// Delay records for one employee within a month, oldest first — the
/// alert engine's input.
pub async fn delays_in_month(
    pool: &SqlitePool,
    employee_id: i64,
    month_pattern: &str,
) -> RepoResult<Vec<AttendanceRecord>> {
    let sql = format!(
        "{ATTENDANCE_SELECT} WHERE employee_id = ? AND status = 'delay' AND date LIKE ? ORDER BY date ASC"
    );
    let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(employee_id)
        .bind(month_pattern)
        .fetch_all(pool)
        .await?;
    Ok(records)
}

/// Distinct (year, one-based month, record count) with attendance data,
/// newest first.
pub async fn archived_months(pool: &SqlitePool) -> RepoResult<Vec<(i64, i64, i64)>> {
    let rows = sqlx::query_as::<_, (i64, i64, i64)>(
        "SELECT CAST(strftime('%Y', date) AS INTEGER) as year, \
                CAST(strftime('%m', date) AS INTEGER) as month, \
                COUNT(*) as record_count \
         FROM attendance \
         GROUP BY strftime('%Y-%m', date) \
         ORDER BY year DESC, month DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
