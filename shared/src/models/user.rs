//! User Model (tutors and their supervising admins)

use serde::{Deserialize, Serialize};

/// Role of a user account. Exactly two levels exist: admins supervise
/// tutors, tutors manage employee rosters.
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TUTOR: &str = "tutor";

/// User account row.
///
/// Invariant: a tutor's `supervisor_id` points at an admin; admins have
/// no supervisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub branch_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub created_at: i64,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// User shape returned by the login endpoint (no credential material).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub branch_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    /// Tutor ids this user supervises (empty unless admin).
    pub supervised_user_ids: Vec<i64>,
}
