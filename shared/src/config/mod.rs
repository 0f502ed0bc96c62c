//! Configuration module with concern-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Validity cache (Redis) configuration
//! - `database` - Token store connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - gRPC server and worker pool configuration

pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token store configuration
    pub database: DatabaseConfig,

    /// Validity cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the process environment take precedence.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check that the timeouts fit together
    ///
    /// A lookup makes at most one store call and two cache calls, so the
    /// per-request deadline must exceed their combined bounds or a slow
    /// dependency surfaces as a transport timeout instead of a fallback.
    pub fn validate(&self) -> Result<(), String> {
        let request = self.server.request_timeout();
        if request.is_zero() {
            return Err("SERVER_REQUEST_TIMEOUT must be greater than zero".to_string());
        }

        let mut budget = self.database.query_timeout();
        if self.cache.enabled {
            budget += self.cache.operation_timeout() * 2;
        }
        if request <= budget {
            return Err(format!(
                "SERVER_REQUEST_TIMEOUT ({}ms) must exceed the store and cache timeouts of one lookup ({}ms)",
                request.as_millis(),
                budget.as_millis()
            ));
        }

        Ok(())
    }
}

/// Read and parse an environment variable, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
