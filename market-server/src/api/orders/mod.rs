//! Order Routes
//!
//! All order operations require an authenticated actor; role and
//! ownership rules are enforced inside the order lifecycle engine.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        // Status transition (pending -> accepted -> delivered / canceled)
        .route("/{id}", put(handler::update_status))
        // DELETE is cancel semantics - orders are never physically removed
        .route("/{id}", delete(handler::cancel))
}
