//! Enrollment API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/enrollments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::enroll))
        .route("/{studentId}/{groupId}", delete(handler::withdraw))
        .route("/student/{studentId}", get(handler::list_by_student))
        .route(
            "/student/{studentId}/active",
            get(handler::list_active_by_student),
        )
        .route("/group/{groupId}", get(handler::list_by_group))
}
