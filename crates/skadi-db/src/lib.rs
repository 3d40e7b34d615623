//! # Skadi DB
//!
//! Database pool and user repository for the Skadi API.
//!
//! The authentication core only needs one thing from storage: the id,
//! password hash and role of a user, looked up by username. That need is the
//! [`UserRepository`] trait; [`PgUserRepository`] implements it on
//! PostgreSQL with SQLx.
//!
//! # Example
//!
//! ```ignore
//! use skadi_db::{DatabaseConfig, PgUserRepository, init_db_pool};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! let users = PgUserRepository::new(pool, config.query_timeout);
//!
//! let record = users.find_by_username("admin").await?;
//! ```

pub mod config;
pub mod users;

use sqlx::postgres::PgPoolOptions;

pub use config::DatabaseConfig;
pub use sqlx::PgPool;
pub use users::{PgUserRepository, RepositoryError, UserRepository};

/// Initializes a PostgreSQL connection pool.
///
/// Call once at startup; the pool is cheaply cloneable and shared through
/// the application state.
///
/// # Errors
///
/// Returns the SQLx error if no connection can be established within
/// `config.query_timeout`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout)
        .connect(&config.url)
        .await
}
