//! User repository.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use skadi_models::{CredentialRecord, NewUser};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database query timed out")]
    Timeout,

    #[error("username is already taken")]
    Duplicate,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Looks up a user by username. `Ok(None)` if no such user exists.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError>;

    async fn create_user(&self, user: NewUser) -> Result<CredentialRecord, RepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let query = sqlx::query_as::<_, CredentialRecord>(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool);

        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| RepositoryError::Timeout)?
            .map_err(RepositoryError::from)
    }

    #[instrument(skip(self, user), fields(username = %user.username, role = %user.role))]
    async fn create_user(&self, user: NewUser) -> Result<CredentialRecord, RepositoryError> {
        let query = sqlx::query_as::<_, CredentialRecord>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool);

        match tokio::time::timeout(self.timeout, query).await {
            Err(_) => Err(RepositoryError::Timeout),
            Ok(Err(sqlx::Error::Database(e))) if e.is_unique_violation() => {
                Err(RepositoryError::Duplicate)
            }
            Ok(result) => result.map_err(RepositoryError::from),
        }
    }
}
