//! Alert Model
//!
//! Accumulated-delay notifications. Uniqueness is enforced by the
//! database on (user, employee, month, year) rather than by scanning
//! payload text.

use serde::{Deserialize, Serialize};

/// Alert row targeted at a tutor or their supervisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Alert {
    pub id: i64,
    pub user_id: i64,
    pub employee_id: i64,
    /// One-based month the alert refers to.
    pub month: i64,
    pub year: i64,
    /// JSON-encoded [`AlertDetails`].
    pub details: String,
    pub is_read: bool,
    pub created_at: i64,
}

impl Alert {
    pub fn parsed_details(&self) -> Option<AlertDetails> {
        serde_json::from_str(&self.details).ok()
    }
}

/// One delay occurrence inside an alert payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayEntry {
    pub date: String,
    pub comment: Option<String>,
}

/// Payload stored in `Alert::details`, shape-compatible with the
/// historical records (`type: "3_delays"`, localized month name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: String,
    pub employee_name: String,
    /// Localized (Spanish) month name, e.g. "Enero".
    pub month: String,
    pub year: i64,
    pub count: usize,
    pub latest_date: String,
    pub delays: Vec<DelayEntry>,
}
