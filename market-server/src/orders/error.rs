//! Order engine error taxonomy
//!
//! Every failure the engine can produce is a typed variant here; only
//! genuinely unexpected faults (storage failures) pass through as
//! [`OrderError::Unexpected`].

use shared::AppError;
use thiserror::Error;

use crate::db::models::OrderStatus;
use crate::db::repository::RepoError;

/// Errors returned by the order lifecycle engine
#[derive(Debug, Error)]
pub enum OrderError {
    /// Missing or malformed request input (no items, bad quantity)
    #[error("{0}")]
    MalformedRequest(String),

    /// An item references a nonexistent or unavailable product
    #[error("{0}")]
    ItemsInvalid(String),

    /// No order with the requested id
    #[error("Order not found")]
    NotFound,

    /// Actor lacks ownership/visibility over the order
    #[error("Forbidden")]
    Forbidden,

    /// Requested change is not an edge of the status graph
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Structurally valid change that this role may not perform in the
    /// order's current state (distinct from ownership failures)
    #[error("{0}")]
    InvalidForRole(&'static str),

    /// Explicit cancel attempted on a terminal order
    #[error("Order can not be canceled anymore")]
    AlreadyFinal,

    /// Storage failure - logged server-side, opaque to the caller
    #[error(transparent)]
    Unexpected(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::MalformedRequest(msg) => AppError::validation(msg),
            OrderError::ItemsInvalid(msg) => AppError::validation(msg),
            OrderError::NotFound => AppError::not_found("Order"),
            OrderError::Forbidden => AppError::forbidden("Forbidden"),
            err @ OrderError::InvalidTransition { .. } => AppError::invalid(err.to_string()),
            OrderError::InvalidForRole(msg) => AppError::forbidden(msg),
            OrderError::AlreadyFinal => {
                AppError::business_rule("Order can not be canceled anymore")
            }
            OrderError::Unexpected(e) => e.into(),
        }
    }
}
