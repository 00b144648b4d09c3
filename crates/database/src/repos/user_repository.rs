//! User repository for database operations.

use crate::entities::{NewUser, User};
use crate::types::DatabaseResult;
use sqlx::SqlitePool;
use tracing::debug;

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by exact email match
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!(email, "looking up user by email");
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        debug!(user_id = id, "looking up user by id");
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user and return the stored row
    pub async fn create(&self, request: &NewUser) -> DatabaseResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, password, email) VALUES (?, ?, ?) RETURNING id, name, email, password",
        )
        .bind(&request.name)
        .bind(&request.password)
        .bind(&request.email)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_pool;

    fn create_test_user_request() -> NewUser {
        NewUser {
            name: "Devin Sanders".to_string(),
            email: "tristanjacobs@gmail.com".to_string(),
            password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_returns_generated_id() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);
        let request = create_test_user_request();

        let user = repo.create(&request).await.unwrap();

        assert!(user.id > 0);
        assert_eq!(user.name, request.name);
        assert_eq!(user.email, request.email);
        assert_eq!(user.password, request.password);
    }

    #[tokio::test]
    async fn test_find_by_id_after_create() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let created = repo.create(&create_test_user_request()).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);
        let created = repo.create(&create_test_user_request()).await.unwrap();

        let found = repo.find_by_email("tristanjacobs@gmail.com").await.unwrap();
        assert_eq!(found.map(|user| user.id), Some(created.id));

        assert!(repo.find_by_email("tristanjacobs@gmail").await.unwrap().is_none());
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_missing_returns_none() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_surfaces_driver_error() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);
        repo.create(&create_test_user_request()).await.unwrap();

        let error = repo.create(&create_test_user_request()).await.unwrap_err();
        assert!(error.is_unique_violation());
    }
}
