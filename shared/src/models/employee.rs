//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee row. Visibility is mediated through the roster relation,
/// not through direct ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub branch_id: Option<i64>,
    pub hire_date: Option<String>,
    pub status: String,
}

/// Employee joined with its branch name (list/detail views).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeWithBranch {
    pub id: i64,
    pub full_name: String,
    pub branch_id: Option<i64>,
    pub branch_name: Option<String>,
    pub hire_date: Option<String>,
    pub status: String,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub full_name: String,
    pub branch_id: i64,
    pub hire_date: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub full_name: String,
    pub branch_id: i64,
    pub hire_date: Option<String>,
}
