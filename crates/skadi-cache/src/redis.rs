//! Redis client with bounded command latency.
//!
//! Every command runs under `op_timeout`. A command that does not finish in
//! time is reported as [`CacheError::Timeout`]; callers must treat that as
//! "unknown", never as a negative answer.

use std::future::Future;
use std::time::Duration;

use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use tracing::{debug, error, instrument};

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("cache operation timed out")]
    Timeout,
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server
    /// refuses the connection, `CacheError::Timeout` if it does not answer
    /// within `op_timeout`.
    pub async fn new(redis_url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = tokio::time::timeout(op_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout)??;

        Ok(Self { conn, op_timeout })
    }

    /// Caps a single command at `op_timeout`. Only the Redis-backed tests
    /// (run with `--ignored`) reach this path.
    async fn bounded<T, F>(&self, op: F) -> Result<T, CacheError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CacheError::Timeout),
        }
    }

    /// Sets `key` to `value` with a millisecond-precision TTL in one atomic
    /// `SET key value PX ttl` command.
    #[instrument(skip(self, value), fields(cache.operation = "SET"))]
    pub async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        // PX 0 is rejected by Redis
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        let result: Result<(), CacheError> = self
            .bounded(async {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("PX")
                    .arg(ttl_ms)
                    .query_async(&mut conn)
                    .await
            })
            .await;

        match &result {
            Ok(()) => debug!(cache.key = %key, cache.ttl_ms = %ttl_ms, "Cache set"),
            Err(e) => error!(cache.key = %key, error = %e, "Redis SET failed"),
        }

        result
    }

    #[instrument(skip(self), fields(cache.operation = "EXISTS"))]
    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();

        let result = self.bounded(conn.exists::<_, bool>(key)).await;

        if let Err(e) = &result {
            error!(cache.key = %key, error = %e, "Redis EXISTS failed");
        }

        result
    }

    #[instrument(skip(self), fields(cache.operation = "PING"))]
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        let _: String = self
            .bounded(async { redis::cmd("PING").query_async(&mut conn).await })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connect_times_out_when_server_never_answers() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let result = RedisCache::new(&format!("redis://{addr}"), Duration::from_millis(200)).await;

        assert!(matches!(result, Err(CacheError::Timeout)));
        silent.abort();
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_set_and_exists() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(2))
            .await
            .unwrap();

        cache
            .set_with_ttl("skadi:test:key", "1", Duration::from_secs(5))
            .await
            .unwrap();

        assert!(cache.exists("skadi:test:key").await.unwrap());
        assert!(!cache.exists("skadi:test:missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let result = RedisCache::new("not a url", Duration::from_millis(100)).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }
}
