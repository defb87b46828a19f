//! Incident Model

use serde::{Deserialize, Serialize};

/// Legacy uppercase status found in migrated data; equivalent to
/// `in_progress`.
pub const LEGACY_IN_PROGRESS: &str = "EN PROCESO";

/// Statuses that count as "active" for dashboards and stats. The
/// repository layer derives its SQL open-state filter from this set
/// plus the legacy spelling.
pub const OPEN_STATUSES: [&str; 2] = ["pending", "in_progress"];

/// Map the legacy `EN PROCESO` spelling onto `in_progress`.
pub fn normalize_status(status: &str) -> &str {
    if status == LEGACY_IN_PROGRESS {
        "in_progress"
    } else {
        status
    }
}

/// Incident row joined with reporter and branch names. `reported_by`
/// is canonically an employee id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct IncidentWithNames {
    pub id: i64,
    pub branch_id: Option<i64>,
    pub reported_by: i64,
    pub reported_by_name: String,
    pub branch_name: Option<String>,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub incident_type: String,
    pub status: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: i64,
}

impl IncidentWithNames {
    /// Status with the legacy uppercase variant folded in.
    pub fn normalized_status(&self) -> &str {
        normalize_status(&self.status)
    }

    pub fn is_active(&self) -> bool {
        OPEN_STATUSES.contains(&self.normalized_status())
    }

    /// Fold the legacy spelling into the canonical status for responses.
    pub fn normalized(mut self) -> Self {
        let status = self.normalized_status().to_string();
        self.status = status;
        self
    }
}

/// Create incident payload — branch is derived from the employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentCreate {
    pub employee_id: i64,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub status: String,
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Update incident payload (full replacement, any status to any status).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentUpdate {
    pub employee_id: i64,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub status: String,
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}
