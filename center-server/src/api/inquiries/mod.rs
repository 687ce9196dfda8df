//! Inquiry API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inquiries", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/status/{status}", get(handler::list_by_status))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
