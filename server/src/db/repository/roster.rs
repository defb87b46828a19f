//! Roster Repository
//!
//! The roster relation is the join point authorization flows through:
//! every scoped query filters on `added_by_user_id IN (authorized set)`.

use super::RepoResult;
use shared::models::RosterEmployee;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// Claim an employee into a tutor's roster. An employee belongs to
/// exactly one roster; re-adding replaces the owner.
pub async fn add(pool: &SqlitePool, employee_id: i64, user_id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO attendance_roster (employee_id, added_by_user_id, created_at) \
         VALUES (?1, ?2, ?3) \
         ON CONFLICT(employee_id) DO UPDATE SET added_by_user_id = excluded.added_by_user_id",
    )
    .bind(employee_id)
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove(pool: &SqlitePool, employee_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM attendance_roster WHERE employee_id = ?")
        .bind(employee_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Current roster owner (tutor) of an employee, if any.
pub async fn owner_of(pool: &SqlitePool, employee_id: i64) -> RepoResult<Option<i64>> {
    let owner = sqlx::query_scalar::<_, i64>(
        "SELECT added_by_user_id FROM attendance_roster WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    Ok(owner)
}

/// Roster members owned by any of the given users, with branch info,
/// ordered by name. Empty owner set short-circuits to no rows.
pub async fn members_for_owners(
    pool: &SqlitePool,
    owner_ids: &[i64],
) -> RepoResult<Vec<RosterEmployee>> {
    if owner_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT e.id, e.full_name, e.branch_id, b.name as branch_name \
         FROM attendance_roster ar \
         JOIN employees e ON ar.employee_id = e.id \
         LEFT JOIN branches b ON e.branch_id = b.id \
         WHERE ar.added_by_user_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in owner_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(") ORDER BY e.full_name ASC");

    let members = qb
        .build_query_as::<RosterEmployee>()
        .fetch_all(pool)
        .await?;
    Ok(members)
}

/// Number of distinct employees across the given owners' rosters.
pub async fn count_for_owners(pool: &SqlitePool, owner_ids: &[i64]) -> RepoResult<i64> {
    if owner_ids.is_empty() {
        return Ok(0);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT COUNT(DISTINCT employee_id) FROM attendance_roster WHERE added_by_user_id IN (",
    );
    let mut separated = qb.separated(", ");
    for id in owner_ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let count: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(count)
}
