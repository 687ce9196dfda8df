//! Attendance API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create_sheet))
        .route("/month/{year}/{month}", get(handler::list_by_month))
        .route(
            "/group/{groupId}/date/{date}",
            get(handler::list_by_group_and_date),
        )
        .route(
            "/group/{groupId}/month/{year}/{month}",
            get(handler::list_by_group_and_month),
        )
        .route(
            "/student/{studentId}/month/{year}/{month}",
            get(handler::list_by_student_and_month),
        )
        .route(
            "/student/{studentId}/group/{groupId}/month/{year}/{month}",
            get(handler::list_by_pair_and_month),
        )
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}
