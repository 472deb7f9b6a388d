use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderService;
use crate::sellers::SellerService;

/// Server state - holds shared references to every service
///
/// All services are stateless components constructed once at startup and
/// passed into handlers through axum's `State` extractor. Cloning is
/// shallow: the database handle and JWT service are shared via `Arc`
/// internally.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database |
/// | jwt_service | Arc<JwtService> | Token issue/verify |
/// | orders | OrderService | Order lifecycle engine |
/// | sellers | SellerService | Seller profile aggregation |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
    /// Order lifecycle engine
    pub orders: OrderService,
    /// Seller aggregation service
    pub sellers: SellerService,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Order of operations:
    /// 1. Work directory layout (database/, logs/)
    /// 2. Embedded database at `work_dir/database/market.db`
    /// 3. Services (JWT, orders, sellers)
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be opened - the server is useless
    /// without it.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("market.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db_service.db)
    }

    /// Build state around an existing database handle
    ///
    /// Used by tests to run against an in-memory database.
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let orders = OrderService::new(db.clone());
        let sellers = SellerService::new(db.clone());

        Self {
            config,
            db,
            jwt_service,
            orders,
            sellers,
        }
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
