//! Report Repository
//!
//! One document per (employee, month, year). Supports full-document
//! replacement and merge-patch of a single cell. Months are one-based
//! here; the API layer converts from the external zero-based form.

use super::{RepoError, RepoResult};
use shared::models::{Report, ReportData, ReportSection};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const REPORT_SELECT: &str =
    "SELECT id, employee_id, month, year, data, updated_at FROM reports";

pub async fn find_by_key(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
) -> RepoResult<Option<Report>> {
    let sql = format!("{REPORT_SELECT} WHERE employee_id = ? AND month = ? AND year = ?");
    let report = sqlx::query_as::<_, Report>(&sql)
        .bind(employee_id)
        .bind(month)
        .bind(year)
        .fetch_optional(pool)
        .await?;
    Ok(report)
}

pub async fn find_for_employees(
    pool: &SqlitePool,
    employee_ids: &[i64],
    month: u32,
    year: i32,
) -> RepoResult<Vec<Report>> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(REPORT_SELECT);
    qb.push(" WHERE month = ").push_bind(month);
    qb.push(" AND year = ").push_bind(year);
    qb.push(" AND employee_id IN (");
    let mut separated = qb.separated(", ");
    for id in employee_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let reports = qb.build_query_as::<Report>().fetch_all(pool).await?;
    Ok(reports)
}

/// Replace (or create) the whole document for the key.
pub async fn upsert(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
    data: &ReportData,
) -> RepoResult<()> {
    let json = serde_json::to_string(data)
        .map_err(|e| RepoError::Database(format!("Failed to encode report: {e}")))?;
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO reports (employee_id, month, year, data, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT(employee_id, month, year) DO UPDATE SET \
             data = excluded.data, updated_at = excluded.updated_at",
    )
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .bind(&json)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Merge-patch a single cell: read the existing document (or start an
/// empty one), apply the change, write back. Status `"empty"` clears
/// the slot.
pub async fn patch_cell(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
    section: ReportSection,
    key: &str,
    status: &str,
    comment: Option<String>,
) -> RepoResult<()> {
    let mut data = find_by_key(pool, employee_id, month, year)
        .await?
        .map(|r| r.parsed_data())
        .unwrap_or_default();

    data.apply_cell(section, key, status, comment);
    upsert(pool, employee_id, month, year, &data).await
}

/// Distinct (year, one-based month, record count) with report data,
/// newest first.
pub async fn archived_months(pool: &SqlitePool) -> RepoResult<Vec<(i64, i64, i64)>> {
    let rows = sqlx::query_as::<_, (i64, i64, i64)>(
        "SELECT year, month, COUNT(*) as record_count FROM reports \
         GROUP BY year, month ORDER BY year DESC, month DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
