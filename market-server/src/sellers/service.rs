//! Seller profile service
//!
//! Re-derives seller ownership from the product table and folds the
//! intersecting orders into per-seller sales statistics. Items belonging
//! to other sellers in a mixed order are hidden from the profile.

use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::AppError;

use crate::db::models::{Order, OrderItem, OrderStatus, Product, Role, User};
use crate::db::repository::{OrderRepository, ProductRepository, UserRepository};

const USER_TABLE: &str = "user";

/// Public projection of a seller account
#[derive(Debug, Clone, Serialize)]
pub struct SellerPublic {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for SellerPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_string()).unwrap_or_default(),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Aggregated sales counters for one seller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SellerStats {
    /// Orders containing at least one of the seller's products
    pub orders_count: usize,
    /// Units sold across the seller's own items only
    pub items_sold: u64,
    /// Intersecting orders that reached `delivered`
    pub delivered_count: usize,
}

/// One order as seen from a seller's profile: only the seller's own items
#[derive(Debug, Clone, Serialize)]
pub struct SellerOrderView {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
}

/// Sales block of a seller profile
#[derive(Debug, Clone, Serialize)]
pub struct SellerSales {
    pub stats: SellerStats,
    pub orders: Vec<SellerOrderView>,
}

/// Full public profile of a seller
#[derive(Debug, Clone, Serialize)]
pub struct SellerProfile {
    pub seller: SellerPublic,
    pub products: Vec<Product>,
    pub sales: SellerSales,
}

/// Seller aggregation service
#[derive(Clone)]
pub struct SellerService {
    users: UserRepository,
    products: ProductRepository,
    orders: OrderRepository,
}

impl SellerService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            products: ProductRepository::new(db.clone()),
            orders: OrderRepository::new(db),
        }
    }

    /// Public list of every seller account
    pub async fn list_sellers(&self) -> Result<Vec<SellerPublic>, AppError> {
        let sellers = self.users.find_by_role(Role::Seller).await?;
        Ok(sellers.into_iter().map(SellerPublic::from).collect())
    }

    /// Public profile of one seller: account data, catalog and sales
    /// history derived from intersecting orders.
    pub async fn seller_profile(&self, seller_id: &str) -> Result<SellerProfile, AppError> {
        let record_id: RecordId = seller_id
            .parse()
            .map_err(|_| AppError::validation("Invalid seller id"))?;
        if record_id.table() != USER_TABLE {
            return Err(AppError::validation("Invalid seller id"));
        }

        let seller = self
            .users
            .find_by_id(seller_id)
            .await?
            .filter(|user| user.role == Role::Seller)
            .ok_or_else(|| AppError::not_found("Seller"))?;

        let products = self.products.find_by_seller(&record_id).await?;

        // No products means no sales history at all
        if products.is_empty() {
            return Ok(SellerProfile {
                seller: SellerPublic::from(seller),
                products,
                sales: SellerSales {
                    stats: SellerStats::default(),
                    orders: Vec::new(),
                },
            });
        }

        let product_ids: Vec<RecordId> = products
            .iter()
            .filter_map(|p| p.id.clone())
            .collect();

        let orders = self.orders.find_containing_any(&product_ids).await?;

        let mut stats = SellerStats {
            orders_count: orders.len(),
            ..SellerStats::default()
        };

        let order_views: Vec<SellerOrderView> = orders
            .into_iter()
            .map(|order| {
                if order.status == OrderStatus::Delivered {
                    stats.delivered_count += 1;
                }
                let view = filtered_view(order, &product_ids);
                stats.items_sold += view
                    .items
                    .iter()
                    .map(|item| u64::from(item.quantity))
                    .sum::<u64>();
                view
            })
            .collect();

        Ok(SellerProfile {
            seller: SellerPublic::from(seller),
            products,
            sales: SellerSales {
                stats,
                orders: order_views,
            },
        })
    }
}

/// Project an order down to the given seller's items
fn filtered_view(order: Order, product_ids: &[RecordId]) -> SellerOrderView {
    let items = order.items_for_products(product_ids);
    SellerOrderView {
        id: order.id.map(|id| id.to_string()).unwrap_or_default(),
        status: order.status,
        created_at: order.created_at,
        updated_at: order.updated_at,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CurrentUser;
    use crate::db::DbService;
    use crate::db::models::{ProductCreate, UserCreate};
    use crate::orders::{OrderItemInput, OrderService};
    use rust_decimal::Decimal;

    struct Fx {
        svc: SellerService,
        order_svc: OrderService,
        orders: OrderRepository,
        buyer: CurrentUser,
        seller_id: RecordId,
        p1: RecordId,
        p2: RecordId,
        p3: RecordId,
    }

    async fn fixture() -> Fx {
        let db = DbService::memory().await.unwrap().db;
        let users = UserRepository::new(db.clone());
        let products = ProductRepository::new(db.clone());

        let mk_user = |username: &str, role: Role| UserCreate {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "correct-horse-battery".to_string(),
            role,
        };

        let seller = users.create(mk_user("sam", Role::Seller)).await.unwrap();
        let other = users.create(mk_user("sue", Role::Seller)).await.unwrap();
        let buyer = users.create(mk_user("alice", Role::Buyer)).await.unwrap();

        let seller_id = seller.id.unwrap();
        let other_id = other.id.unwrap();

        let mk_product = |name: &str| ProductCreate {
            name: name.to_string(),
            description: None,
            price: Decimal::new(1000, 2),
            available: None,
        };

        let p1 = products
            .create(seller_id.clone(), mk_product("lamp"))
            .await
            .unwrap();
        let p2 = products
            .create(seller_id.clone(), mk_product("desk"))
            .await
            .unwrap();
        let p3 = products.create(other_id, mk_product("rug")).await.unwrap();

        Fx {
            svc: SellerService::new(db.clone()),
            order_svc: OrderService::new(db.clone()),
            orders: OrderRepository::new(db),
            buyer: CurrentUser {
                id: buyer.id.as_ref().unwrap().to_string(),
                username: buyer.username.clone(),
                email: buyer.email.clone(),
                role: buyer.role,
            },
            seller_id,
            p1: p1.id.unwrap(),
            p2: p2.id.unwrap(),
            p3: p3.id.unwrap(),
        }
    }

    fn item(product: &RecordId, quantity: i64) -> OrderItemInput {
        OrderItemInput {
            product_id: product.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_profile_aggregates_and_filters_items() {
        let fx = fixture().await;

        // Order A: pending, 2x p1 (sam) + 5x p3 (sue)
        fx.order_svc
            .create_order(&fx.buyer, vec![item(&fx.p1, 2), item(&fx.p3, 5)])
            .await
            .unwrap();

        // Order B: delivered, 3x p2 (sam)
        let order_b = fx
            .order_svc
            .create_order(&fx.buyer, vec![item(&fx.p2, 3)])
            .await
            .unwrap();
        fx.orders
            .set_status(order_b.id.as_ref().unwrap(), OrderStatus::Delivered)
            .await
            .unwrap();

        let profile = fx
            .svc
            .seller_profile(&fx.seller_id.to_string())
            .await
            .unwrap();

        assert_eq!(profile.products.len(), 2);
        assert_eq!(
            profile.sales.stats,
            SellerStats {
                orders_count: 2,
                items_sold: 5, // 2 + 3, never counting sue's 5x p3
                delivered_count: 1,
            }
        );

        // The mixed order exposes only sam's item
        let mixed = profile
            .sales
            .orders
            .iter()
            .find(|o| o.status == OrderStatus::Pending)
            .unwrap();
        assert_eq!(mixed.items.len(), 1);
        assert_eq!(mixed.items[0].product, fx.p1);
        assert_eq!(mixed.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_profile_without_products_has_empty_sales() {
        let fx = fixture().await;
        let db_users = fx.svc.users.clone();

        let lonely = db_users
            .create(UserCreate {
                username: "lonely".to_string(),
                email: "lonely@example.com".to_string(),
                password: "correct-horse-battery".to_string(),
                role: Role::Seller,
            })
            .await
            .unwrap();

        let profile = fx
            .svc
            .seller_profile(&lonely.id.unwrap().to_string())
            .await
            .unwrap();

        assert!(profile.products.is_empty());
        assert!(profile.sales.orders.is_empty());
        assert_eq!(profile.sales.stats, SellerStats::default());
    }

    #[tokio::test]
    async fn test_profile_rejects_malformed_id() {
        let fx = fixture().await;

        let err = fx.svc.seller_profile("definitely not an id").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Well-formed id for the wrong table is also malformed here
        let err = fx.svc.seller_profile("product:abc").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_profile_missing_or_non_seller_is_not_found() {
        let fx = fixture().await;

        let err = fx.svc.seller_profile("user:doesnotexist").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // A buyer account is not a seller profile
        let err = fx.svc.seller_profile(&fx.buyer.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_sellers_public_projection() {
        let fx = fixture().await;

        let sellers = fx.svc.list_sellers().await.unwrap();
        assert_eq!(sellers.len(), 2);
        assert!(sellers.iter().any(|s| s.username == "sam"));
        // Serialized output never contains password material by type
        let json = serde_json::to_value(&sellers).unwrap();
        assert!(json[0].get("password_hash").is_none());
    }
}
