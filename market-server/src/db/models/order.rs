//! Order Model
//!
//! The order is the central entity of the marketplace. Its `status` field
//! only ever moves along the directed graph encoded in
//! [`OrderStatus::TRANSITIONS`]; nothing writes it directly.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Order status
///
/// Lifecycle:
///
/// ```text
/// pending -> accepted -> delivered
///    |          |
///    +----------+-----> canceled
/// ```
///
/// `delivered` and `canceled` are terminal - an order that reaches either
/// is permanently immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Directed edges of the status graph. No self-loops: requesting the
    /// current status again is always rejected.
    pub const TRANSITIONS: &'static [(OrderStatus, OrderStatus)] = &[
        (OrderStatus::Pending, OrderStatus::Accepted),
        (OrderStatus::Pending, OrderStatus::Canceled),
        (OrderStatus::Accepted, OrderStatus::Delivered),
        (OrderStatus::Accepted, OrderStatus::Canceled),
    ];

    /// Whether `self -> to` is an edge of the status graph
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        Self::TRANSITIONS.contains(&(self, to))
    }

    /// Terminal statuses permit no further mutation
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single order line: product reference plus quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub quantity: u32,
}

/// Order entity
///
/// `buyer` and `items` are immutable after creation; `status` is mutated
/// only through the order lifecycle engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    #[serde(with = "serde_helpers::record_id")]
    pub buyer: RecordId,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Whether any item references one of the given products.
    ///
    /// This is the ownership test for sellers: a seller may see or act on
    /// an order iff it contains at least one of their products.
    pub fn contains_any_product(&self, product_ids: &[RecordId]) -> bool {
        self.items
            .iter()
            .any(|item| product_ids.contains(&item.product))
    }

    /// Items view restricted to the given products (other sellers' lines
    /// in a mixed order are hidden).
    pub fn items_for_products(&self, product_ids: &[RecordId]) -> Vec<OrderItem> {
        self.items
            .iter()
            .filter(|item| product_ids.contains(&item.product))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    #[test]
    fn test_allowed_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Accepted));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Canceled));
        assert!(OrderStatus::Accepted.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::Accepted.can_transition_to(OrderStatus::Canceled));
    }

    #[test]
    fn test_no_self_loops() {
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_terminal_statuses_have_no_outgoing_edges() {
        for status in [OrderStatus::Delivered, OrderStatus::Canceled] {
            assert!(status.is_terminal());
            for to in ALL {
                assert!(!status.can_transition_to(to));
            }
        }
    }

    #[test]
    fn test_exactly_four_edges() {
        let mut edges = 0;
        for from in ALL {
            for to in ALL {
                if from.can_transition_to(to) {
                    edges += 1;
                }
            }
        }
        assert_eq!(edges, 4);
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(status, OrderStatus::Delivered);
    }
}
