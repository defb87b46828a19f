//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, EmployeeWithBranch};
use sqlx::SqlitePool;

const EMPLOYEE_WITH_BRANCH_SELECT: &str = "SELECT e.id, e.full_name, e.branch_id, b.name as branch_name, e.hire_date, e.status FROM employees e LEFT JOIN branches b ON e.branch_id = b.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<EmployeeWithBranch>> {
    let sql = format!("{EMPLOYEE_WITH_BRANCH_SELECT} ORDER BY e.full_name ASC");
    let employees = sqlx::query_as::<_, EmployeeWithBranch>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, full_name, branch_id, hire_date, status FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    if data.full_name.trim().is_empty() {
        return Err(RepoError::Validation("Employee name is required".into()));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employees (full_name, branch_id, hire_date, status) \
         VALUES (?1, ?2, ?3, 'active') RETURNING id",
    )
    .bind(&data.full_name)
    .bind(data.branch_id)
    .bind(&data.hire_date)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    if data.full_name.trim().is_empty() {
        return Err(RepoError::Validation("Employee name is required".into()));
    }

    let rows = sqlx::query(
        "UPDATE employees SET full_name = ?1, branch_id = ?2, hire_date = ?3 WHERE id = ?4",
    )
    .bind(&data.full_name)
    .bind(data.branch_id)
    .bind(&data.hire_date)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
