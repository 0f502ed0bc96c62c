//! Wire types for the `verification.Auth` service.
//!
//! Mirrors `proto/verification.proto`; the service stubs are generated by
//! `build.rs`.

/// Request carrying the bearer token to check
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenValidatorRequest {
    #[prost(string, tag = "1")]
    pub bearer: ::prost::alloc::string::String,
}

/// Validation outcome
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenValidatorResponse {
    #[prost(string, tag = "1")]
    pub msg: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub success: bool,
}

include!(concat!(env!("OUT_DIR"), "/verification.Auth.rs"));
