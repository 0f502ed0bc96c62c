//! # Infrastructure Layer
//!
//! Concrete adapters for the token validator's external dependencies:
//!
//! - **Database**: MySQL token store using SQLx
//! - **Cache**: Redis validity cache with retry logic
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL token store (default)
//! - `redis-cache`: Enable the Redis validity cache (default)

#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "redis-cache")]
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Cached value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for tv_core::errors::StoreError {
    fn from(err: InfrastructureError) -> Self {
        tv_core::errors::StoreError::Unavailable {
            message: err.to_string(),
        }
    }
}

impl From<InfrastructureError> for tv_core::errors::CacheError {
    fn from(err: InfrastructureError) -> Self {
        tv_core::errors::CacheError::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tv_core::errors::{CacheError, StoreError};

    #[test]
    fn test_config_error_maps_to_store_unavailable() {
        let err: StoreError = InfrastructureError::Config("bad url".to_string()).into();
        assert_eq!(
            err,
            StoreError::Unavailable {
                message: "Configuration error: bad url".to_string()
            }
        );
    }

    #[test]
    fn test_serialization_error_maps_to_cache_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CacheError = InfrastructureError::from(json_err).into();
        assert!(err.message.starts_with("Serialization error"));
    }
}
