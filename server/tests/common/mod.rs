//! Shared test fixtures: a migrated temp-file database plus seed
//! helpers for the usual admin/tutor/employee arrangement.

use sqlx::SqlitePool;
use tempfile::TempDir;

use tutoria_server::db::repository::{employee, roster, user};
use tutoria_server::db::DbService;
use shared::models::{Employee, EmployeeCreate, User, ROLE_ADMIN, ROLE_TUTOR};

pub async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(db_path.to_str().unwrap())
        .await
        .expect("open test database");
    (dir, db.pool)
}

pub async fn seed_admin(pool: &SqlitePool, username: &str) -> User {
    user::create(pool, username, "secret", ROLE_ADMIN, None, None)
        .await
        .expect("create admin")
}

pub async fn seed_tutor(pool: &SqlitePool, username: &str, supervisor_id: Option<i64>) -> User {
    user::create(pool, username, "secret", ROLE_TUTOR, None, supervisor_id)
        .await
        .expect("create tutor")
}

pub async fn seed_employee(pool: &SqlitePool, name: &str) -> Employee {
    let branch = sqlx::query_scalar::<_, i64>(
        "INSERT INTO branches (name) VALUES ('Centro') \
         ON CONFLICT(name) DO UPDATE SET name = name RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("seed branch");

    employee::create(
        pool,
        EmployeeCreate {
            full_name: name.to_string(),
            branch_id: branch,
            hire_date: Some("2023-06-01".to_string()),
        },
    )
    .await
    .expect("create employee")
}

pub async fn assign_to_roster(pool: &SqlitePool, employee_id: i64, tutor_id: i64) {
    roster::add(pool, employee_id, tutor_id)
        .await
        .expect("add to roster");
}
