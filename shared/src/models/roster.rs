//! Roster Model
//!
//! A roster entry claims an employee into a tutor's managed list.
//! At most one entry exists per employee; re-adding replaces the owner.

use serde::{Deserialize, Serialize};

/// Add-to-roster payload (`userId` keeps the external camelCase key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterAdd {
    pub employee_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Roster member joined with employee and branch info.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RosterEmployee {
    pub id: i64,
    pub full_name: String,
    pub branch_id: Option<i64>,
    pub branch_name: Option<String>,
}
