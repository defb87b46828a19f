//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error types
//! - [`time`] - date parsing and the month-convention boundary
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{ok, AppError, AppResponse};
pub use result::AppResult;
