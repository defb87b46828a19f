//! Compliance engine
//!
//! The scoped aggregation core: business-day calendar, accumulated
//! delay alerting, and the monthly compliance scorer. Everything here
//! is driven by repositories and the holiday provider; the calendar and
//! scorer themselves are pure functions.

pub mod calendar;
pub mod delays;
pub mod score;

pub use calendar::business_days;
pub use score::{EmployeeScore, ScorePolicy, TutorScore};
