//! Server configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// gRPC server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Runtime worker threads serving calls
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Maximum in-flight requests per connection
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("[::]"),
            port: 50051,
            workers: default_workers(),
            request_timeout: default_request_timeout(),
            concurrency_limit: default_concurrency_limit(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host.clone()),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers).max(1),
            request_timeout: env_or("SERVER_REQUEST_TIMEOUT", defaults.request_timeout),
            concurrency_limit: env_or("SERVER_CONCURRENCY_LIMIT", defaults.concurrency_limit)
                .max(1),
        }
    }

    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn default_workers() -> usize {
    10
}

fn default_request_timeout() -> u64 {
    10 // 10 seconds
}

fn default_concurrency_limit() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    #[test]
    fn test_default_bind_address_parses() {
        let config = ServerConfig::default();
        let addr: SocketAddr = config.bind_address().parse().unwrap();
        assert_eq!(addr.port(), 50051);
        assert!(addr.is_ipv6());
    }

    #[test]
    fn test_custom_bind_address() {
        let config = ServerConfig::new("127.0.0.1", 6000);
        assert_eq!(config.bind_address(), "127.0.0.1:6000");
    }
}
