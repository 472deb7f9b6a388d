//! User Administration Routes
//!
//! Full CRUD over user accounts, restricted to administrators.

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::auth::middleware::require_admin;
use crate::core::ServerState;

/// User admin router - every route behind the admin gate
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete))
        .layer(axum_middleware::from_fn(require_admin))
}
