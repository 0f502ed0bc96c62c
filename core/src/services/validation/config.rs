//! Configuration for the token validator

use std::time::Duration;

use tv_shared::config::{CacheConfig, DatabaseConfig};

/// Configuration for the token validator
#[derive(Debug, Clone)]
pub struct TokenValidatorConfig {
    /// Upper bound on a single store lookup or delete
    pub store_timeout: Duration,
    /// Upper bound on how long a validity entry stays cached
    pub cache_ttl: Duration,
    /// Upper bound on a single cache read or write
    pub cache_timeout: Duration,
}

impl Default for TokenValidatorConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(300),
            cache_timeout: Duration::from_millis(250),
        }
    }
}

impl TokenValidatorConfig {
    /// Derive validator limits from the store and cache settings
    pub fn from_settings(database: &DatabaseConfig, cache: &CacheConfig) -> Self {
        Self {
            store_timeout: database.query_timeout(),
            cache_ttl: Duration::from_secs(cache.default_ttl),
            cache_timeout: cache.operation_timeout(),
        }
    }

    /// How long a revocation tombstone must outlive the revoke
    ///
    /// Covers the longest a lookup started before the revoke can take to
    /// reach its cache write, and never less than one cache TTL.
    pub fn tombstone_hold(&self) -> Duration {
        let in_flight = self.store_timeout + self.cache_timeout * 2;
        self.cache_ttl.max(in_flight)
    }
}
