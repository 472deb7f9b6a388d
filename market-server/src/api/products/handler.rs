//! Product Catalog Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/products - list the catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_all().await?;
    Ok(Json(products))
}

/// GET /api/products/:id - fetch one product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;
    Ok(Json(product))
}

/// POST /api/products - create a product
///
/// Seller only; the owner is always the authenticated actor, never taken
/// from the payload.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    if !user.is_seller() {
        return Err(AppError::forbidden("Only sellers can create products"));
    }
    if payload.price.is_sign_negative() {
        return Err(AppError::validation("Price must not be negative"));
    }

    let seller: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid user id: {}", user.id)))?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(seller, payload).await?;

    tracing::info!(
        product_id = %product.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        seller = %user.id,
        "Product created"
    );

    Ok(Json(product))
}

/// PUT /api/products/:id - update a product (owning seller or admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price
        && price.is_sign_negative()
    {
        return Err(AppError::validation("Price must not be negative"));
    }

    let repo = ProductRepository::new(state.get_db());
    check_product_ownership(&repo, &id, &user).await?;

    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - delete a product (owning seller or admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.get_db());
    check_product_ownership(&repo, &id, &user).await?;

    repo.delete(&id).await?;
    Ok(Json(true))
}

/// Admins may touch any product; sellers only their own.
async fn check_product_ownership(
    repo: &ProductRepository,
    id: &str,
    user: &CurrentUser,
) -> AppResult<()> {
    let product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;

    if user.is_admin() {
        return Ok(());
    }
    if user.is_seller() && product.seller.to_string() == user.id {
        return Ok(());
    }

    Err(AppError::forbidden("Not the owner of this product"))
}
