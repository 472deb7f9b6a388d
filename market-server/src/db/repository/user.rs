//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Role, User, UserCreate, UserUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY username")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find users by role
    pub async fn find_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE role = $role ORDER BY username")
            .bind(("role", role))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if record_id.table() != USER_TABLE {
            return Err(RepoError::Validation(format!("Invalid ID: {}", id)));
        }
        let user: Option<User> = self.base.db().select(record_id).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user (hashes the password)
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        // Check duplicate email before insert for a friendly message; the
        // unique index still backstops races.
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with email '{}' already exists",
                data.email
            )));
        }

        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    username = $username,
                    email = $email,
                    password_hash = $password_hash,
                    role = $role,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("email", data.email))
            .bind(("password_hash", password_hash))
            .bind(("role", data.role))
            .bind(("now", chrono::Utc::now()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        // Re-hash if a new password was provided
        let password_hash = match &data.password {
            Some(password) => Some(
                User::hash_password(password)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            ),
            None => None,
        };

        let mut set_parts: Vec<&str> = Vec::new();
        if data.username.is_some() {
            set_parts.push("username = $username");
        }
        if data.email.is_some() {
            set_parts.push("email = $email");
        }
        if password_hash.is_some() {
            set_parts.push("password_hash = $password_hash");
        }
        if data.role.is_some() {
            set_parts.push("role = $role");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)));
        }
        set_parts.push("updated_at = $now");

        let query_str = format!("UPDATE $record SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("record", record_id))
            .bind(("now", chrono::Utc::now()));

        if let Some(v) = data.username {
            query = query.bind(("username", v));
        }
        if let Some(v) = data.email {
            query = query.bind(("email", v));
        }
        if let Some(v) = password_hash {
            query = query.bind(("password_hash", v));
        }
        if let Some(v) = data.role {
            query = query.bind(("role", v));
        }

        let mut result = query.await?;
        let users: Vec<User> = result.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let deleted: Option<User> = self.base.db().delete(record_id).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_repo() -> UserRepository {
        let service = DbService::memory().await.unwrap();
        UserRepository::new(service.db)
    }

    fn user_create(username: &str, email: &str, role: Role) -> UserCreate {
        UserCreate {
            username: username.to_string(),
            email: email.to_string(),
            password: "correct-horse-battery".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let repo = test_repo().await;
        let created = repo
            .create(user_create("jane", "jane@example.com", Role::Buyer))
            .await
            .unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.role, Role::Buyer);
        // Hash must be stored, but never equal to the raw password
        assert!(created.verify_password("correct-horse-battery").unwrap());

        let found = repo.find_by_email("jane@example.com").await.unwrap();
        assert_eq!(found.unwrap().username, "jane");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = test_repo().await;
        repo.create(user_create("jane", "jane@example.com", Role::Buyer))
            .await
            .unwrap();
        let err = repo
            .create(user_create("janet", "jane@example.com", Role::Buyer))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_by_role() {
        let repo = test_repo().await;
        repo.create(user_create("s1", "s1@example.com", Role::Seller))
            .await
            .unwrap();
        repo.create(user_create("b1", "b1@example.com", Role::Buyer))
            .await
            .unwrap();

        let sellers = repo.find_by_role(Role::Seller).await.unwrap();
        assert_eq!(sellers.len(), 1);
        assert_eq!(sellers[0].username, "s1");
    }
}
