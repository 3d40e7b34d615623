//! # Skadi Cache
//!
//! Key-value store access for the Skadi API. Its one job today is the
//! refresh-token blacklist:
//!
//! - [`config`]: backend selection and Redis connection settings
//! - [`redis`]: a Redis client whose every command is bounded by a timeout
//! - [`keys`]: cache key layout
//! - [`blacklist`]: the [`RevocationStore`] trait and its Redis and in-memory
//!   implementations
//!
//! # Example
//!
//! ```ignore
//! use skadi_cache::{CacheConfig, revocation_store};
//!
//! let config = CacheConfig::from_env()?;
//! let store = revocation_store(&config).await?;
//!
//! store.revoke(&refresh_token, Duration::from_secs(864_000)).await?;
//! assert!(store.is_revoked(&refresh_token).await?);
//! ```

pub mod blacklist;
pub mod config;
pub mod keys;
pub mod redis;

use std::sync::Arc;

pub use blacklist::{MemoryBlacklist, RedisBlacklist, RevocationStore};
pub use config::{CacheBackend, CacheConfig};
pub use crate::redis::{CacheError, RedisCache};

/// Builds the revocation store selected by `config.backend`.
///
/// # Errors
///
/// For the Redis backend, fails if the server cannot be reached within the
/// configured timeout.
pub async fn revocation_store(config: &CacheConfig) -> Result<Arc<dyn RevocationStore>, CacheError> {
    match config.backend {
        CacheBackend::Redis => {
            let cache = RedisCache::new(&config.redis_url, config.op_timeout).await?;
            cache.ping().await?;
            tracing::info!(prefix = %config.key_prefix, "Redis blacklist connected");
            Ok(Arc::new(RedisBlacklist::new(cache, &config.key_prefix)))
        }
        CacheBackend::Memory => {
            tracing::warn!("Using in-memory blacklist; revocations are lost on restart");
            Ok(Arc::new(MemoryBlacklist::new(&config.key_prefix)))
        }
    }
}
