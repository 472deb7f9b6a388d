//! Seller Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::sellers::{SellerProfile, SellerPublic};
use crate::utils::AppResult;

/// GET /api/sellers - public list of sellers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SellerPublic>>> {
    let sellers = state.sellers.list_sellers().await?;
    Ok(Json(sellers))
}

/// GET /api/sellers/:id - public profile with products and sales stats
pub async fn get_profile(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SellerProfile>> {
    let profile = state.sellers.seller_profile(&id).await?;
    Ok(Json(profile))
}
