//! Role/ownership authorization policy
//!
//! The per-role rule tables for both mutation paths, kept as const data
//! so each rule reads straight out of the source.
//!
//! Status update and explicit cancel are deliberately separate policies:
//! their role matrices differ in the edge cases. A seller may cancel an
//! `accepted` order through the cancel operation, but may not drive
//! `accepted -> canceled` through a status update; a buyer reaches
//! `canceled` through either path under identical preconditions.
//!
//! Ownership is resolved by the caller before evaluation:
//! - buyer: `order.buyer == actor`
//! - seller: order items intersect the seller's product-id set
//! - admin: always owns

use crate::db::models::{OrderStatus, Role};
use crate::orders::error::OrderError;

/// Transitions a seller may drive through a status update
pub const SELLER_STATUS_EDGES: &[(OrderStatus, OrderStatus)] = &[
    (OrderStatus::Pending, OrderStatus::Accepted),
    (OrderStatus::Accepted, OrderStatus::Delivered),
];

/// Statuses from which each role may explicitly cancel an order
pub const ADMIN_CANCELABLE_FROM: &[OrderStatus] =
    &[OrderStatus::Pending, OrderStatus::Accepted];
pub const BUYER_CANCELABLE_FROM: &[OrderStatus] = &[OrderStatus::Pending];
pub const SELLER_CANCELABLE_FROM: &[OrderStatus] =
    &[OrderStatus::Pending, OrderStatus::Accepted];

const BUYER_ONLY_CANCELS: &str = "Buyers can only cancel pending orders";
const BUYER_ONLY_PENDING: &str = "Only pending orders can be canceled by buyer";
const SELLER_EDGE_DENIED: &str = "Seller not allowed for this transition";
const SELLER_CANCEL_DENIED: &str = "Sellers can only cancel pending or accepted orders";

/// Authorize a status update for a structurally valid transition.
///
/// Callers must have already validated `(from, to)` against the status
/// graph; this function only applies the role rules, in the same order
/// the checks were historically made:
///
/// - admin: any valid transition
/// - buyer: only `-> canceled`, only their own order, only from `pending`
/// - seller: only their own order, only the edges in
///   [`SELLER_STATUS_EDGES`]
pub fn authorize_status_change(
    role: Role,
    owns: bool,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<(), OrderError> {
    match role {
        Role::Admin => Ok(()),

        Role::Buyer => {
            if to != OrderStatus::Canceled {
                return Err(OrderError::InvalidForRole(BUYER_ONLY_CANCELS));
            }
            if !owns {
                return Err(OrderError::Forbidden);
            }
            if from != OrderStatus::Pending {
                return Err(OrderError::InvalidForRole(BUYER_ONLY_PENDING));
            }
            Ok(())
        }

        Role::Seller => {
            if !owns {
                return Err(OrderError::Forbidden);
            }
            if !SELLER_STATUS_EDGES.contains(&(from, to)) {
                return Err(OrderError::InvalidForRole(SELLER_EDGE_DENIED));
            }
            Ok(())
        }
    }
}

/// Authorize an explicit cancel.
///
/// Unlike [`authorize_status_change`] this path never consults the status
/// graph; each role has its own current-state gate:
///
/// - admin: any order not already terminal
/// - buyer: their own order, `pending` only
/// - seller: their own order, `pending` or `accepted`
pub fn authorize_cancel(
    role: Role,
    owns: bool,
    current: OrderStatus,
) -> Result<(), OrderError> {
    match role {
        Role::Admin => {
            if !ADMIN_CANCELABLE_FROM.contains(&current) {
                return Err(OrderError::AlreadyFinal);
            }
            Ok(())
        }

        Role::Buyer => {
            if !owns {
                return Err(OrderError::Forbidden);
            }
            if !BUYER_CANCELABLE_FROM.contains(&current) {
                return Err(OrderError::InvalidForRole(BUYER_ONLY_PENDING));
            }
            Ok(())
        }

        Role::Seller => {
            if !owns {
                return Err(OrderError::Forbidden);
            }
            if !SELLER_CANCELABLE_FROM.contains(&current) {
                return Err(OrderError::InvalidForRole(SELLER_CANCEL_DENIED));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_admin_allows_every_valid_edge() {
        for &(from, to) in OrderStatus::TRANSITIONS {
            assert!(authorize_status_change(Role::Admin, true, from, to).is_ok());
            // Ownership is irrelevant for admins
            assert!(authorize_status_change(Role::Admin, false, from, to).is_ok());
        }
    }

    #[test]
    fn test_buyer_capability_checked_before_ownership() {
        // A buyer who does not own the order asking for a non-cancel
        // transition gets the role error, not the ownership error
        let err = authorize_status_change(Role::Buyer, false, Pending, Accepted).unwrap_err();
        assert!(matches!(err, OrderError::InvalidForRole(_)));
    }

    #[test]
    fn test_buyer_cancel_rules() {
        assert!(authorize_status_change(Role::Buyer, true, Pending, Canceled).is_ok());

        let err = authorize_status_change(Role::Buyer, false, Pending, Canceled).unwrap_err();
        assert!(matches!(err, OrderError::Forbidden));

        let err = authorize_status_change(Role::Buyer, true, Accepted, Canceled).unwrap_err();
        assert!(matches!(err, OrderError::InvalidForRole(_)));
    }

    #[test]
    fn test_seller_ownership_checked_first() {
        let err = authorize_status_change(Role::Seller, false, Pending, Accepted).unwrap_err();
        assert!(matches!(err, OrderError::Forbidden));
    }

    #[test]
    fn test_seller_status_edges() {
        assert!(authorize_status_change(Role::Seller, true, Pending, Accepted).is_ok());
        assert!(authorize_status_change(Role::Seller, true, Accepted, Delivered).is_ok());

        // Graph-valid cancel edges are still denied to sellers here
        for from in [Pending, Accepted] {
            let err = authorize_status_change(Role::Seller, true, from, Canceled).unwrap_err();
            assert!(matches!(err, OrderError::InvalidForRole(_)));
        }
    }

    #[test]
    fn test_cancel_gates_per_role() {
        // Admin: anything not terminal
        assert!(authorize_cancel(Role::Admin, false, Pending).is_ok());
        assert!(authorize_cancel(Role::Admin, false, Accepted).is_ok());
        assert!(matches!(
            authorize_cancel(Role::Admin, false, Delivered).unwrap_err(),
            OrderError::AlreadyFinal
        ));
        assert!(matches!(
            authorize_cancel(Role::Admin, false, Canceled).unwrap_err(),
            OrderError::AlreadyFinal
        ));

        // Buyer: pending only
        assert!(authorize_cancel(Role::Buyer, true, Pending).is_ok());
        assert!(matches!(
            authorize_cancel(Role::Buyer, true, Accepted).unwrap_err(),
            OrderError::InvalidForRole(_)
        ));

        // Seller: pending or accepted - wider than the seller's
        // status-update edges on purpose
        assert!(authorize_cancel(Role::Seller, true, Pending).is_ok());
        assert!(authorize_cancel(Role::Seller, true, Accepted).is_ok());
        assert!(matches!(
            authorize_cancel(Role::Seller, true, Delivered).unwrap_err(),
            OrderError::InvalidForRole(_)
        ));
    }
}
