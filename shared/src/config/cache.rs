//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where cached validity entries live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Shared Redis instance
    #[default]
    Redis,
    /// Process-local map
    Memory,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "local" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Validity cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Whether the validity cache is used at all
    #[serde(default)]
    pub enabled: bool,

    /// Cache backend
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Connection attempts before giving up at startup
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Upper bound on the TTL of a cache entry in seconds
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,

    /// Cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Upper bound on a single cache read or write in milliseconds
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            backend: CacheBackend::default(),
            url: String::from("redis://localhost:6379"),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            default_ttl: default_ttl(),
            key_prefix: Some(String::from("access_token")),
            operation_timeout_ms: default_operation_timeout(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let url = std::env::var("REDIS_URL").unwrap_or(defaults.url.clone());
        let key_prefix = match std::env::var("CACHE_KEY_PREFIX") {
            Ok(prefix) if prefix.is_empty() => None,
            Ok(prefix) => Some(prefix),
            Err(_) => defaults.key_prefix.clone(),
        };

        Self {
            enabled: env_or("CACHE_ENABLED", defaults.enabled),
            backend: env_or("CACHE_BACKEND", defaults.backend),
            url,
            default_ttl: env_or("CACHE_DEFAULT_TTL", defaults.default_ttl),
            key_prefix,
            operation_timeout_ms: env_or("CACHE_TIMEOUT_MS", defaults.operation_timeout_ms),
            ..defaults
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            enabled: true,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Get cache operation timeout as Duration
    pub fn operation_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.operation_timeout_ms)
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    100
}

fn default_operation_timeout() -> u64 {
    250
}

fn default_ttl() -> u64 {
    300 // 5 minutes
}
