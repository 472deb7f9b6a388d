//! Market Server - marketplace REST backend
//!
//! # Module structure
//!
//! ```text
//! market-server/src/
//! ├── core/          # Config, state, server bootstrap
//! ├── auth/          # JWT authentication, current-user extraction
//! ├── db/            # Embedded SurrealDB, models, repositories
//! ├── orders/        # Order lifecycle engine (state machine + policy)
//! ├── sellers/       # Seller profile aggregation
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Logging and result helpers
//! ```
//!
//! The order lifecycle engine under `orders/` is the heart of the server:
//! it owns the status state machine and the role/ownership authorization
//! rules for buyers, sellers and admins. Everything else is thin plumbing
//! around it.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod sellers;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderService};
pub use sellers::SellerService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured auth events via tracing
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and wire up logging.
///
/// Called once from `main` before anything else touches the environment.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___           __        __
   /  |/  /___ ______/ /_____  / /_
  / /|_/ / __ `/ ___/ //_/ _ \/ __/
 / /  / / /_/ / /  / ,< /  __/ /_
/_/  /_/\__,_/_/  /_/|_|\___/\__/
    "#
    );
}
