//! Branch catalog module

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/branches", get(handler::list).post(handler::create))
}
