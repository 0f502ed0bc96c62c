//! # Token Validator Core
//!
//! Core domain layer of the access-token validation service.
//! This crate contains the access token entity, the validity rules,
//! the token store and cache interfaces, and the `TokenValidator`
//! service that ties them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
