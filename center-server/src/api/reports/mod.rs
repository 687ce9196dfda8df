//! Report API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/daily/{year}/{month}/{day}", get(handler::daily))
        .route("/monthly/{year}/{month}", get(handler::monthly))
        .route("/yearly/{year}", get(handler::yearly))
}
