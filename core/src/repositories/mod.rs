pub mod access_token;

pub use access_token::AccessTokenRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use access_token::MockAccessTokenRepository;
