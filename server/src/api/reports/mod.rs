//! Monthly report module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::replace))
        .route("/cell", post(handler::patch_cell))
        .route("/archived-months", get(handler::archived_months))
        .route("/{employee_id}", get(handler::get_one))
}
