//! Business services containing domain logic and use cases.

pub mod validation;

// Re-export commonly used types
pub use validation::{
    mask_token, InMemoryTokenCache, TokenCache, TokenValidator, TokenValidatorConfig,
};
