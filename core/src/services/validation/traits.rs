//! Trait for validity cache integration

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::AccessToken;
use crate::errors::CacheError;

/// Read-through cache of live token records, keyed by token string
///
/// Revocation writes a tombstone under the token's key. A tombstone reads
/// as a miss and rejects every `put` until it expires, so a lookup that
/// raced a revoke cannot bring the deleted record back. The check and the
/// write in `put` must be atomic.
///
/// The cache is never a source of truth.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Get a cached record for a token; tombstones read as `None`
    async fn get(&self, token: &str) -> Result<Option<AccessToken>, CacheError>;

    /// Cache a record for at most `ttl`, replacing any live entry
    ///
    /// Returns `Ok(false)` without writing when the token is tombstoned.
    async fn put(&self, record: &AccessToken, ttl: Duration) -> Result<bool, CacheError>;

    /// Replace any entry for `token` with a tombstone held for `hold`
    async fn tombstone(&self, token: &str, hold: Duration) -> Result<(), CacheError>;
}
