//! Domain models
//!
//! Plain serde structs matching the SQLite schema. With the `db` feature
//! enabled they also derive `sqlx::FromRow` for direct row mapping.

pub mod alert;
pub mod attendance;
pub mod branch;
pub mod employee;
pub mod incident;
pub mod report;
pub mod roster;
pub mod user;

pub use alert::{Alert, AlertDetails, DelayEntry};
pub use attendance::{AttendanceMark, AttendanceRecord, AttendanceStatus};
pub use branch::Branch;
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate, EmployeeWithBranch};
pub use incident::{IncidentCreate, IncidentUpdate, IncidentWithNames};
pub use report::{Report, ReportCell, ReportCellUpdate, ReportData, ReportSection};
pub use roster::{RosterAdd, RosterEmployee};
pub use user::{PublicUser, User, ROLE_ADMIN, ROLE_TUTOR};
