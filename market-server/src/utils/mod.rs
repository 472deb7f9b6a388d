//! Utility module - logging and shared result types

pub mod logger;
pub mod result;

// Re-export error types from shared
pub use result::AppResult;
pub use shared::error::{ApiResponse, AppError, ok, ok_with_message};
