//! Order lifecycle service
//!
//! The single entry point for every order read and mutation. Handlers call
//! into this service; nothing else touches the `order` table.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::db::models::{Order, OrderItem, OrderStatus, Role};
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::orders::error::OrderError;
use crate::orders::policy;

/// One requested order line, as submitted by the client
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i64,
}

/// Order lifecycle engine
///
/// Stateless; holds only the repositories it reads and writes through.
/// Constructed once at startup and injected via [`crate::ServerState`].
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    products: ProductRepository,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            products: ProductRepository::new(db),
        }
    }

    /// Create a new order for `actor` with `pending` status.
    ///
    /// Validates the request shape first (non-empty items, every quantity
    /// at least 1), then resolves all referenced products in one batch
    /// lookup: a size mismatch means some product does not exist, and any
    /// resolved product that is unavailable rejects the whole order.
    ///
    /// There is deliberately no stock reservation or decrement - a
    /// product flipped to unavailable between the read and the insert can
    /// still be ordered.
    pub async fn create_order(
        &self,
        actor: &CurrentUser,
        items: Vec<OrderItemInput>,
    ) -> Result<Order, OrderError> {
        if items.is_empty() {
            return Err(OrderError::MalformedRequest("Items are required".to_string()));
        }

        if items.iter().any(|item| item.quantity < 1) {
            return Err(OrderError::MalformedRequest(
                "Quantity must be >= 1 for all items".to_string(),
            ));
        }

        let buyer = actor_record_id(actor)?;

        let product_ids: Vec<RecordId> = items
            .iter()
            .map(|item| {
                item.product_id.parse::<RecordId>().map_err(|_| {
                    OrderError::ItemsInvalid("One or more products do not exist".to_string())
                })
            })
            .collect::<Result<_, _>>()?;

        let products = self.products.find_by_ids(&product_ids).await?;
        if products.len() != items.len() {
            return Err(OrderError::ItemsInvalid(
                "One or more products do not exist".to_string(),
            ));
        }

        if let Some(unavailable) = products.iter().find(|p| !p.available) {
            let id = unavailable
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default();
            return Err(OrderError::ItemsInvalid(format!(
                "Product {} is not available",
                id
            )));
        }

        let normalized: Vec<OrderItem> = items
            .iter()
            .zip(product_ids)
            .map(|(item, product)| OrderItem {
                product,
                quantity: item.quantity as u32,
            })
            .collect();

        let order = self.orders.create(buyer, normalized).await?;

        tracing::info!(
            order_id = %order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            buyer = %actor.id,
            items = order.items.len(),
            "Order created"
        );

        Ok(order)
    }

    /// List orders visible to `actor`.
    ///
    /// - admin: every order
    /// - buyer: orders they placed
    /// - seller: orders containing at least one of their products
    pub async fn list_orders(&self, actor: &CurrentUser) -> Result<Vec<Order>, OrderError> {
        match actor.role {
            Role::Admin => Ok(self.orders.find_all().await?),
            Role::Buyer => {
                let buyer = actor_record_id(actor)?;
                Ok(self.orders.find_by_buyer(&buyer).await?)
            }
            Role::Seller => {
                let product_ids = self.seller_product_ids(actor).await?;
                if product_ids.is_empty() {
                    return Ok(Vec::new());
                }
                Ok(self.orders.find_containing_any(&product_ids).await?)
            }
        }
    }

    /// Fetch a single order, enforcing visibility rules.
    pub async fn get_order(&self, order_id: &str, actor: &CurrentUser) -> Result<Order, OrderError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        match actor.role {
            Role::Admin => Ok(order),
            Role::Buyer => {
                if order.buyer != actor_record_id(actor)? {
                    return Err(OrderError::Forbidden);
                }
                Ok(order)
            }
            Role::Seller => {
                let product_ids = self.seller_product_ids(actor).await?;
                if !order.contains_any_product(&product_ids) {
                    return Err(OrderError::Forbidden);
                }
                Ok(order)
            }
        }
    }

    /// Drive the order through a status transition.
    ///
    /// The structural check against the status graph runs before any role
    /// rule: a non-edge (including re-requesting the current status)
    /// fails with [`OrderError::InvalidTransition`] for admins too.
    pub async fn update_status(
        &self,
        order_id: &str,
        actor: &CurrentUser,
        to: OrderStatus,
    ) -> Result<Order, OrderError> {
        let record_id: RecordId = order_id.parse().map_err(|_| OrderError::NotFound)?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        let from = order.status;
        if !from.can_transition_to(to) {
            return Err(OrderError::InvalidTransition { from, to });
        }

        let owns = self.resolve_ownership(&order, actor).await?;
        policy::authorize_status_change(actor.role, owns, from, to)?;

        let updated = self.orders.set_status(&record_id, to).await?;

        tracing::info!(
            order_id = %order_id,
            actor = %actor.id,
            role = %actor.role,
            from = %from,
            to = %to,
            "Order status updated"
        );

        Ok(updated)
    }

    /// Cancel an order.
    ///
    /// A distinct operation from [`Self::update_status`] with its own
    /// per-role state gates (see [`policy::authorize_cancel`]).
    pub async fn cancel_order(
        &self,
        order_id: &str,
        actor: &CurrentUser,
    ) -> Result<Order, OrderError> {
        let record_id: RecordId = order_id.parse().map_err(|_| OrderError::NotFound)?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        let owns = self.resolve_ownership(&order, actor).await?;
        policy::authorize_cancel(actor.role, owns, order.status)?;

        let updated = self
            .orders
            .set_status(&record_id, OrderStatus::Canceled)
            .await?;

        tracing::info!(
            order_id = %order_id,
            actor = %actor.id,
            role = %actor.role,
            from = %order.status,
            "Order canceled"
        );

        Ok(updated)
    }

    /// Resolve whether `actor` owns `order` in the sense their role cares
    /// about. Admins always own; buyers own their own orders; sellers own
    /// orders containing at least one of their products.
    async fn resolve_ownership(
        &self,
        order: &Order,
        actor: &CurrentUser,
    ) -> Result<bool, OrderError> {
        match actor.role {
            Role::Admin => Ok(true),
            Role::Buyer => Ok(order.buyer == actor_record_id(actor)?),
            Role::Seller => {
                let product_ids = self.seller_product_ids(actor).await?;
                Ok(order.contains_any_product(&product_ids))
            }
        }
    }

    async fn seller_product_ids(&self, actor: &CurrentUser) -> Result<Vec<RecordId>, OrderError> {
        let seller = actor_record_id(actor)?;
        Ok(self.products.find_ids_by_seller(&seller).await?)
    }
}

fn actor_record_id(actor: &CurrentUser) -> Result<RecordId, OrderError> {
    actor
        .id
        .parse()
        .map_err(|_| OrderError::MalformedRequest(format!("Invalid user id: {}", actor.id)))
}
