//! Authentication module
//!
//! JWT authentication and middleware:
//! - [`JwtService`] - token issue and verification
//! - [`CurrentUser`] - authenticated actor context
//! - [`require_auth`] - authentication middleware
//! - [`require_admin`] - admin-gate middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
