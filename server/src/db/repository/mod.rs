//! Repository Module
//!
//! Free functions over `&SqlitePool`, one module per table.

pub mod alert;
pub mod attendance;
pub mod branch;
pub mod employee;
pub mod incident;
pub mod report;
pub mod roster;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            // FK violations point at a nonexistent referenced row
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepoError::Validation(db.to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
