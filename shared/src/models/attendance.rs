//! Attendance Model

use serde::{Deserialize, Serialize};

/// Daily attendance status.
///
/// `None` is a payload sentinel: marking with it deletes the record for
/// that (employee, date) key. It is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum AttendanceStatus {
    Present,
    Absent,
    Delay,
    Vacation,
    Permission,
    Incapacity,
    None,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Delay => "delay",
            Self::Vacation => "vacation",
            Self::Permission => "permission",
            Self::Incapacity => "incapacity",
            Self::None => "none",
        }
    }

    /// Whether this status counts as attendance coverage for scoring
    /// (absent and incapacity are tracked but do not cover the day).
    pub fn covers_day(&self) -> bool {
        matches!(
            self,
            Self::Present | Self::Delay | Self::Vacation | Self::Permission
        )
    }
}

/// Attendance record, unique per (employee, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub status: AttendanceStatus,
    pub comment: Option<String>,
    pub arrival_time: Option<String>,
    pub permission_type: Option<String>,
    /// Range start for multi-day vacation/permission/incapacity spans.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: i64,
}

/// Mark payload — a full-replace upsert, not a partial merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub employee_id: i64,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub permission_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}
