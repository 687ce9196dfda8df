//! Payment API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/student/{studentId}", get(handler::list_by_student))
        .route("/group/{groupId}", get(handler::list_by_group))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
