//! gRPC surface of the token validator: the `verification.Auth` service,
//! server bootstrap, CLI and tracing setup.

pub mod cli;
pub mod proto;
pub mod server;
pub mod service;
pub mod telemetry;

pub use service::ValidationService;
