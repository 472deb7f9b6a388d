//! Product Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductUpdate, UserId};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id: RecordId = match id.parse() {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        let product: Option<Product> = self.base.db().select(record_id).await?;
        Ok(product)
    }

    /// Batch lookup by id
    ///
    /// Returns only the products that exist; callers compare the result
    /// size against the request size to detect dangling references.
    pub async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE id IN $ids")
            .bind(("ids", ids.to_vec()))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find all products owned by a seller
    pub async fn find_by_seller(&self, seller: &UserId) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE seller = $seller ORDER BY name")
            .bind(("seller", seller.clone()))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Resolve a seller's own product-id set (for ownership checks)
    pub async fn find_ids_by_seller(&self, seller: &UserId) -> RepoResult<Vec<RecordId>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM product WHERE seller = $seller")
            .bind(("seller", seller.clone()))
            .await?
            .take(0)?;
        Ok(ids)
    }

    /// Create a new product owned by `seller`
    pub async fn create(&self, seller: UserId, data: ProductCreate) -> RepoResult<Product> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE product SET
                    name = $name,
                    seller = $seller,
                    description = $description,
                    price = $price,
                    available = $available,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("seller", seller))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("available", data.available.unwrap_or(true)))
            .bind(("now", chrono::Utc::now()))
            .await?;

        let created: Option<Product> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.available.is_some() {
            set_parts.push("available = $available");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }
        set_parts.push("updated_at = $now");

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("record", record_id))
            .bind(("now", chrono::Utc::now()));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.available {
            query = query.bind(("available", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let deleted: Option<Product> = self.base.db().delete(record_id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{Role, UserCreate};
    use crate::db::repository::UserRepository;
    use rust_decimal::Decimal;

    async fn seed() -> (ProductRepository, UserId) {
        let service = DbService::memory().await.unwrap();
        let users = UserRepository::new(service.db.clone());
        let seller = users
            .create(UserCreate {
                username: "seller".to_string(),
                email: "seller@example.com".to_string(),
                password: "correct-horse-battery".to_string(),
                role: Role::Seller,
            })
            .await
            .unwrap();
        (ProductRepository::new(service.db), seller.id.unwrap())
    }

    fn product(name: &str) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            description: None,
            price: Decimal::new(1999, 2),
            available: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_available() {
        let (repo, seller) = seed().await;
        let created = repo.create(seller, product("widget")).await.unwrap();
        assert!(created.available);
        assert_eq!(created.price, Decimal::new(1999, 2));
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_missing() {
        let (repo, seller) = seed().await;
        let p1 = repo.create(seller.clone(), product("a")).await.unwrap();
        let missing: RecordId = "product:doesnotexist".parse().unwrap();

        let found = repo
            .find_by_ids(&[p1.id.clone().unwrap(), missing])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_seller_product_id_set() {
        let (repo, seller) = seed().await;
        repo.create(seller.clone(), product("a")).await.unwrap();
        repo.create(seller.clone(), product("b")).await.unwrap();

        let ids = repo.find_ids_by_seller(&seller).await.unwrap();
        assert_eq!(ids.len(), 2);
    }
}
