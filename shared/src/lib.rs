//! Shared types for the marketplace platform
//!
//! Common types used across crates: the unified error type, the API
//! response envelope, and the client-facing request/response DTOs.

pub mod client;
pub mod error;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ok, ok_with_message};
pub use serde::{Deserialize, Serialize};
