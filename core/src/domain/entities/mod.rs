//! Domain entities representing core business objects.

pub mod access_token;


// Re-export commonly used types
pub use access_token::{AccessToken, ACCESS_TOKEN_TABLE};
