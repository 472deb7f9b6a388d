//! Order Handlers
//!
//! Thin HTTP shims over [`crate::orders::OrderService`]; every rule lives
//! in the engine.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus};
use crate::orders::OrderItemInput;
use crate::utils::{AppError, AppResult};

/// Create order payload
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Status update payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - list orders visible to the actor
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list_orders(&user).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - fetch one order
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get_order(&id, &user).await?;
    Ok(Json(order))
}

/// POST /api/orders - place a new order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    let order = state.orders.create_order(&user, payload.items).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id - request a status transition
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let status = payload
        .status
        .ok_or_else(|| AppError::validation("Status is required"))?;

    let order = state.orders.update_status(&id, &user, status).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id - cancel an order
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.cancel_order(&id, &user).await?;
    Ok(Json(order))
}
