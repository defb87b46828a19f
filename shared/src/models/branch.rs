//! Branch Model

use serde::{Deserialize, Serialize};

/// Organization branch (dropdown source, referenced by employees).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub name: String,
}
