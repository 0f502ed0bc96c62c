//! `verification.Auth` service implementation

use tonic::{Request, Response, Status};

use tv_core::errors::ValidationError;
use tv_core::services::{mask_token, TokenValidator};

use crate::proto::auth_server::{Auth, AuthServer};
use crate::proto::{TokenValidatorRequest, TokenValidatorResponse};

pub const MSG_TOKEN_MISSING: &str = "Token missing";
pub const MSG_INVALID_TOKEN: &str = "Invalid Token";
pub const MSG_TOKEN_VALID: &str = "Token valid";

/// Answers `ValidateToken` calls from a shared `TokenValidator`
///
/// Every outcome is reported in the response body; the call itself never
/// fails with a gRPC status.
#[derive(Clone)]
pub struct ValidationService {
    validator: TokenValidator,
}

impl ValidationService {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }

    /// Wrap in the generated tonic server
    pub fn into_server(self) -> AuthServer<Self> {
        AuthServer::new(self)
    }

    /// Map a bearer token to the response body
    pub async fn check(&self, bearer: &str) -> TokenValidatorResponse {
        tracing::debug!(token = %mask_token(bearer), "ValidateToken called");

        match self.validator.lookup(bearer).await {
            Ok(_) => respond(true, MSG_TOKEN_VALID),
            Err(ValidationError::MissingInput) => respond(false, MSG_TOKEN_MISSING),
            Err(ValidationError::NotFound) => {
                tracing::debug!(token = %mask_token(bearer), "Rejected unknown token");
                respond(false, MSG_INVALID_TOKEN)
            }
            Err(e) => {
                tracing::error!(
                    token = %mask_token(bearer),
                    error = %e,
                    "Token validation failed"
                );
                respond(false, MSG_INVALID_TOKEN)
            }
        }
    }
}

#[tonic::async_trait]
impl Auth for ValidationService {
    async fn validate_token(
        &self,
        request: Request<TokenValidatorRequest>,
    ) -> Result<Response<TokenValidatorResponse>, Status> {
        let request = request.into_inner();
        Ok(Response::new(self.check(&request.bearer).await))
    }
}

fn respond(success: bool, msg: &str) -> TokenValidatorResponse {
    TokenValidatorResponse {
        msg: msg.to_string(),
        success,
    }
}
