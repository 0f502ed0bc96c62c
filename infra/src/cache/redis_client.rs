//! Redis cache client implementation
//!
//! A multiplexed Redis connection with retry logic and the handful of
//! string operations the validity cache needs: set with a millisecond
//! expiry (optionally guarded against a sentinel value), get, delete and
//! remaining TTL.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use tv_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Sets KEYS[1] to ARGV[1] with a PX of ARGV[2] unless it currently holds ARGV[3]
const SET_UNLESS_SCRIPT: &str = r"
local current = redis.call('GET', KEYS[1])
if current == ARGV[3] then
    return 0
end
redis.call('SET', KEYS[1], ARGV[1], 'PX', ARGV[2])
return 1
";

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with retry logic
///
/// Cloning is cheap; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// Retries the initial connection `config.max_retries` times with
    /// exponential backoff starting at `config.retry_delay_ms`.
    ///
    /// # Example
    /// ```no_run
    /// use tv_infra::cache::RedisClient;
    /// use tv_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379");
    ///     let client = RedisClient::new(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, config.max_retries, config.retry_delay_ms)
                .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Connecting to Redis");

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!(attempts, error = %e, "Failed to connect to Redis");
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value that expires after `ttl`, with millisecond precision
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), InfrastructureError> {
        let millis = ttl.as_millis().max(1) as u64;
        debug!(key, ttl_ms = millis, "Setting key");

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("PX")
                    .arg(millis)
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to set key");
            InfrastructureError::Cache(e)
        })
    }

    /// Set a value that expires after `ttl`, unless the key holds `guard`
    ///
    /// The check and the write run as one script, so a concurrent write of
    /// `guard` is never overwritten. Returns whether the value was written.
    pub async fn set_with_expiry_unless(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
        guard: &str,
    ) -> Result<bool, InfrastructureError> {
        let millis = ttl.as_millis().max(1) as u64;
        debug!(key, ttl_ms = millis, "Setting key unless guarded");

        let written = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();
                let value = value.to_string();
                let guard = guard.to_string();

                Box::pin(async move {
                    redis::Script::new(SET_UNLESS_SCRIPT)
                        .key(key)
                        .arg(value)
                        .arg(millis)
                        .arg(guard)
                        .invoke_async::<_, i64>(&mut conn)
                        .await
                })
            })
            .await
            .map_err(|e| {
                error!(key, error = %e, "Failed to set key");
                InfrastructureError::Cache(e)
            })?;

        Ok(written == 1)
    }

    /// Get a value from cache
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();

            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!(key, error = %e, "Failed to get key");
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let deleted = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!(key, error = %e, "Failed to delete key");
                InfrastructureError::Cache(e)
            })?;

        Ok(deleted > 0)
    }

    /// Remaining time-to-live of a key; `None` if absent or persistent
    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>, InfrastructureError> {
        let millis = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.pttl::<_, i64>(key).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;

        Ok((millis >= 0).then(|| Duration::from_millis(millis as u64)))
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Redis health check failed");
                InfrastructureError::Cache(e)
            })?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!(response = %response, "Redis health check returned unexpected response");
            Ok(false)
        }
    }

    /// Execute a Redis operation with exponential backoff on transient errors
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let max_retries = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;

            match operation(self.connection.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether an error is transient and the operation worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
