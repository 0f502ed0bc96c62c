//! Token validation service module
//!
//! This module provides the bearer token validity workflow:
//! - Point lookup of live tokens in the external store
//! - Expiration, invalidation and scope checks
//! - Destructive revocation that tombstones the cache entry
//! - Optional read-through validity cache bounded by token expiry

mod config;
mod memory_cache;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::TokenValidatorConfig;
pub use memory_cache::InMemoryTokenCache;
pub use service::{mask_token, TokenValidator};
pub use traits::TokenCache;
