//! Cache configuration.
//!
//! # Environment Variables
//!
//! - `CACHE_BACKEND`: `redis` or `memory` (default: `redis`)
//! - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
//! - `CACHE_PREFIX`: prefix for all cache keys (default: `skadi`)
//! - `CACHE_TIMEOUT_MS`: upper bound for a single cache command (default: `2000`)

use std::str::FromStr;
use std::time::Duration;

use skadi_config::{ConfigError, env_source, parse_or};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    /// Process-local map. Revocations do not survive a restart and are not
    /// shared between instances.
    Memory,
}

impl FromStr for CacheBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    pub key_prefix: String,
    pub op_timeout: Duration,
}

impl CacheConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match source("CACHE_BACKEND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "CACHE_BACKEND",
                value: raw,
            })?,
            None => defaults.backend,
        };

        Ok(Self {
            backend,
            redis_url: source("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: source("CACHE_PREFIX").unwrap_or(defaults.key_prefix),
            op_timeout: Duration::from_millis(parse_or(&source, "CACHE_TIMEOUT_MS", 2_000)?),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".into(),
            key_prefix: "skadi".into(),
            op_timeout: Duration::from_secs(2),
        }
    }
}
