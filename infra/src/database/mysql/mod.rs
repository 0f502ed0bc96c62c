//! MySQL repository implementations

pub mod access_token_repository_impl;

pub use access_token_repository_impl::MySqlAccessTokenRepository;
