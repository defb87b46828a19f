//! Tutoría Server - attendance, incident and compliance backend
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # Config, state, HTTP server, provisioning
//! ├── db/            # SQLite pool + repositories
//! ├── compliance/    # Calendar, scorer, delay alert engine
//! ├── services/      # Holiday provider
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Errors, logging, date helpers
//! ```

pub mod api;
pub mod compliance;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
