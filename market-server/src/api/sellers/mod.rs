//! Seller Routes
//!
//! Public directory of sellers and their sales profiles.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Seller router - public routes (allowlisted in require_auth)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/sellers", get(handler::list))
        .route("/api/sellers/{id}", get(handler::get_profile))
}
