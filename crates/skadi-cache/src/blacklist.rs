//! Refresh-token blacklist.
//!
//! A refresh token is revoked by storing a sentinel under its
//! [`blacklist_key`](crate::keys::blacklist_key) with a TTL no shorter than
//! the token's remaining lifetime. The entry then expires on its own; no
//! cleanup job is needed.
//!
//! # Consistency
//!
//! Both implementations rely on per-key atomicity only. `revoke` is a single
//! write, so two concurrent logouts of the same token leave exactly one
//! entry, and a revocation is visible to every later `is_revoked`.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::keys::blacklist_key;
use crate::redis::{CacheError, RedisCache};

/// Value stored under every blacklist key.
const SENTINEL: &str = "1";

#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Marks `token` as revoked for at least `ttl`.
    ///
    /// Idempotent: revoking an already revoked token succeeds.
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Returns whether `token` has an unexpired blacklist entry.
    ///
    /// A storage failure is an error, never `false`.
    async fn is_revoked(&self, token: &str) -> Result<bool, CacheError>;
}

/// Blacklist shared by every API instance through Redis.
#[derive(Debug, Clone)]
pub struct RedisBlacklist {
    cache: RedisCache,
    prefix: String,
}

impl RedisBlacklist {
    pub fn new(cache: RedisCache, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl RevocationStore for RedisBlacklist {
    #[instrument(skip_all)]
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), CacheError> {
        let key = blacklist_key(&self.prefix, token);
        self.cache.set_with_ttl(&key, SENTINEL, ttl).await
    }

    #[instrument(skip_all)]
    async fn is_revoked(&self, token: &str) -> Result<bool, CacheError> {
        let key = blacklist_key(&self.prefix, token);
        self.cache.exists(&key).await
    }
}

/// Process-local blacklist for development and tests.
#[derive(Debug)]
pub struct MemoryBlacklist {
    prefix: String,
    entries: Mutex<HashMap<String, Instant>>,
}

impl MemoryBlacklist {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of unexpired entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|expires_at| **expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBlacklist {
    fn default() -> Self {
        Self::new("skadi")
    }
}

#[async_trait]
impl RevocationStore for MemoryBlacklist {
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), CacheError> {
        let key = blacklist_key(&self.prefix, token);
        let now = Instant::now();
        let expires_at = now + ttl;

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, at| *at > now);

        let entry = entries.entry(key).or_insert(expires_at);
        if *entry < expires_at {
            *entry = expires_at;
        }

        debug!(entries = entries.len(), "Token blacklisted in memory");
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, CacheError> {
        let key = blacklist_key(&self.prefix, token);
        let now = Instant::now();

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(&key) {
            Some(expires_at) if *expires_at > now => Ok(true),
            Some(_) => {
                entries.remove(&key);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}
