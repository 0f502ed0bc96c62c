//! Shared configuration for the token validator workspace
//!
//! This crate provides the configuration types used by every other crate:
//! - Database (token store) connection settings
//! - Validity cache settings
//! - gRPC server settings
//! - Environment detection and logging configuration

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    ServerConfig,
};
