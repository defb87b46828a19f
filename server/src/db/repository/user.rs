//! User Repository
//!
//! Accounts plus the authorization resolver: the single seam through
//! which the two-level supervision hierarchy attenuates visibility.

use super::{RepoError, RepoResult};
use shared::models::{ROLE_ADMIN, User};
use sqlx::SqlitePool;

const USER_SELECT: &str =
    "SELECT id, username, password_hash, role, branch_id, supervisor_id, created_at FROM users";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ? LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Ids of the tutors supervised by the given admin.
pub async fn supervised_tutor_ids(pool: &SqlitePool, admin_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE supervisor_id = ?")
        .bind(admin_id)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Resolve the set of owner ids whose rosters the caller may see.
///
/// - admin: themselves plus every tutor they supervise
/// - tutor (or any non-admin role): themselves only
/// - unknown caller: empty — list endpoints return empty results,
///   single-resource operations must reject
pub async fn resolve_authorized_ids(pool: &SqlitePool, caller_id: i64) -> RepoResult<Vec<i64>> {
    let Some(user) = find_by_id(pool, caller_id).await? else {
        return Ok(Vec::new());
    };

    if user.role == ROLE_ADMIN {
        let mut ids = vec![caller_id];
        ids.extend(supervised_tutor_ids(pool, caller_id).await?);
        Ok(ids)
    } else {
        Ok(vec![caller_id])
    }
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    role: &str,
    branch_id: Option<i64>,
    supervisor_id: Option<i64>,
) -> RepoResult<User> {
    if find_by_username(pool, username).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Username '{username}' already exists"
        )));
    }

    let password_hash = hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    let now = shared::util::now_millis();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password_hash, role, branch_id, supervisor_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(username)
    .bind(&password_hash)
    .bind(role)
    .bind(branch_id)
    .bind(supervisor_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Hash a password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against a stored argon2 hash
pub fn verify_password(hash: &str, password: &str) -> bool {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
