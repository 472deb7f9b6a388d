//! Order Repository
//!
//! Persistence for orders. Status is the only mutable field; the state
//! machine and role rules live in the order lifecycle engine, not here.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderItem, OrderStatus, UserId};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order with `pending` status
    pub async fn create(&self, buyer: UserId, items: Vec<OrderItem>) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    buyer = $buyer,
                    items = $items,
                    status = $status,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("buyer", buyer))
            .bind(("items", items))
            .bind(("status", OrderStatus::Pending))
            .bind(("now", chrono::Utc::now()))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id; a malformed id is treated as absent
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id: RecordId = match id.parse() {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders placed by a buyer, newest first
    pub async fn find_by_buyer(&self, buyer: &UserId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE buyer = $buyer ORDER BY created_at DESC")
            .bind(("buyer", buyer.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders whose item set intersects the given product ids, newest first
    pub async fn find_containing_any(&self, product_ids: &[RecordId]) -> RepoResult<Vec<Order>> {
        // Item product references are embedded in their `table:id` string
        // form, so the intersection compares strings
        let ids: Vec<String> = product_ids.iter().map(|id| id.to_string()).collect();
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE items.product CONTAINSANY $ids ORDER BY created_at DESC",
            )
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a status change (single-document atomic update; no
    /// version guard - last write wins)
    pub async fn set_status(&self, id: &RecordId, status: OrderStatus) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $record SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("record", id.clone()))
            .bind(("status", status))
            .bind(("now", chrono::Utc::now()))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
