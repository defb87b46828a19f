//! Shared domain models for the tutoría backend.
//!
//! The `db` feature adds `sqlx::FromRow` derives so the server crate can
//! map rows directly into these types; consumers that only need the wire
//! shapes (scripts, test clients) can depend on the default feature set.

pub mod models;
pub mod util;
