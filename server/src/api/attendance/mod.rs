//! Attendance module (daily marks + roster)

mod handler;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::month_view).post(handler::mark))
        .route("/{id}", delete(handler::delete_record))
        .route("/roster", get(handler::roster_list).post(handler::roster_add))
        .route("/roster/{employee_id}", delete(handler::roster_remove))
        .route("/archived-months", get(handler::archived_months))
}
