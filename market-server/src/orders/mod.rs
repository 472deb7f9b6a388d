//! Order Lifecycle Engine
//!
//! Owns order records and enforces two layers of rules on every mutation:
//!
//! 1. the **status state machine** (structural - which `(from, to)` edges
//!    exist at all, see [`crate::db::models::OrderStatus::TRANSITIONS`]),
//! 2. the **role/ownership policy** (who may drive a given edge, see
//!    [`policy`]).
//!
//! The structural check always runs first; a transition that is not an
//! edge fails identically for every role, admins included.

pub mod error;
pub mod policy;
pub mod service;


pub use error::OrderError;
pub use service::{OrderItemInput, OrderService};
