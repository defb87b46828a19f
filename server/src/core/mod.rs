//! Core Module
//!
//! Configuration, shared server state, provisioning and the HTTP
//! server itself.

pub mod config;
pub mod provisioning;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
