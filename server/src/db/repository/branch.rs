//! Branch Repository

use super::RepoResult;
use shared::models::Branch;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Branch>> {
    let branches = sqlx::query_as::<_, Branch>("SELECT id, name FROM branches ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(branches)
}

pub async fn create(pool: &SqlitePool, name: &str) -> RepoResult<Branch> {
    let id = sqlx::query_scalar::<_, i64>("INSERT INTO branches (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(Branch {
        id,
        name: name.to_string(),
    })
}
