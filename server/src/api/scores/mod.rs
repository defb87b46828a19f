//! Compliance score module

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/scores", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/employees", get(handler::employee_scores))
        .route("/tutors", get(handler::tutor_scores))
        .route("/export", get(handler::export))
}
