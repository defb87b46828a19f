//! Incident Repository
//!
//! Free-form status CRUD. `reported_by` references an employee; the
//! branch is derived from that employee on every write.

use super::{RepoError, RepoResult};
use shared::models::incident::{
    IncidentCreate, IncidentUpdate, IncidentWithNames, LEGACY_IN_PROGRESS, OPEN_STATUSES,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const INCIDENT_WITH_NAMES_SELECT: &str = "SELECT i.id, i.branch_id, i.reported_by, e.full_name as reported_by_name, b.name as branch_name, i.type, i.status, i.description, i.start_date, i.end_date, i.created_at FROM incidents i JOIN employees e ON i.reported_by = e.id LEFT JOIN branches b ON i.branch_id = b.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<IncidentWithNames>> {
    let sql = format!("{INCIDENT_WITH_NAMES_SELECT} ORDER BY i.created_at DESC");
    let incidents = sqlx::query_as::<_, IncidentWithNames>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(incidents)
}

/// Branch of the reporting employee; rejects unknown employees.
async fn branch_of_employee(pool: &SqlitePool, employee_id: i64) -> RepoResult<Option<i64>> {
    let row = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT branch_id FROM employees WHERE id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::Validation(format!("Employee {employee_id} not found")))
}

pub async fn create(pool: &SqlitePool, data: IncidentCreate) -> RepoResult<i64> {
    let branch_id = branch_of_employee(pool, data.employee_id).await?;
    let now = shared::util::now_millis();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO incidents (branch_id, reported_by, type, status, description, start_date, end_date, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(branch_id)
    .bind(data.employee_id)
    .bind(&data.incident_type)
    .bind(&data.status)
    .bind(&data.description)
    .bind(&data.start_date)
    .bind(&data.end_date)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update(pool: &SqlitePool, id: i64, data: IncidentUpdate) -> RepoResult<()> {
    let branch_id = branch_of_employee(pool, data.employee_id).await?;

    let rows = sqlx::query(
        "UPDATE incidents SET branch_id = ?1, reported_by = ?2, type = ?3, status = ?4, \
         description = ?5, start_date = ?6, end_date = ?7 WHERE id = ?8",
    )
    .bind(branch_id)
    .bind(data.employee_id)
    .bind(&data.incident_type)
    .bind(&data.status)
    .bind(&data.description)
    .bind(&data.start_date)
    .bind(&data.end_date)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Incident {id} not found")));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM incidents WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Active incidents reported by roster members of the given owners.
/// The legacy uppercase spelling is part of the open-state set.
pub async fn find_active_for_owners(
    pool: &SqlitePool,
    owner_ids: &[i64],
) -> RepoResult<Vec<IncidentWithNames>> {
    if owner_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(INCIDENT_WITH_NAMES_SELECT);
    qb.push(
        " JOIN attendance_roster ar ON i.reported_by = ar.employee_id \
         WHERE i.status IN (",
    );
    let mut statuses = qb.separated(", ");
    for status in OPEN_STATUSES.iter().chain([&LEGACY_IN_PROGRESS]) {
        statuses.push_bind(*status);
    }
    statuses.push_unseparated(") AND ar.added_by_user_id IN (");
    let mut owners = qb.separated(", ");
    for id in owner_ids {
        owners.push_bind(id);
    }
    owners.push_unseparated(") ORDER BY i.created_at DESC");

    let incidents = qb
        .build_query_as::<IncidentWithNames>()
        .fetch_all(pool)
        .await?;
    Ok(incidents)
}

pub async fn count_active_for_owners(pool: &SqlitePool, owner_ids: &[i64]) -> RepoResult<i64> {
    Ok(find_active_for_owners(pool, owner_ids).await?.len() as i64)
}
