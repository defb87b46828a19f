//! Dashboard module (scoped aggregates)

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/dashboard", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route("/absences", get(handler::absences))
        .route("/active-ranges", get(handler::active_ranges))
        .route("/active-incidents", get(handler::active_incidents))
}
