//! Group API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/groups", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/sorted-by-teacher", get(handler::list_sorted_by_teacher))
        .route("/teacher/{teacherId}", get(handler::list_by_teacher))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
