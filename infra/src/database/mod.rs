//! Database module - MySQL token store using SQLx
//!
//! - Connection pool management
//! - `AccessTokenRepository` implementation over `provider_accesstoken`

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlAccessTokenRepository;
