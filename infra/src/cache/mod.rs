//! Cache module for the Redis validity cache
//!
//! Connection handling with retry logic, plus the `TokenCache`
//! implementation the validator plugs in when caching is enabled.

pub mod redis_client;
pub mod token_cache;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use token_cache::RedisTokenCache;

pub use tv_shared::config::CacheConfig;
