use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use poem::http::StatusCode;
use poem::{IntoResponse, Request, Response};
use poem_openapi::SecurityScheme;
use poem_openapi::auth::Bearer;
use poem_openapi::error::AuthorizationError;
use serde::{Deserialize, Serialize};

use business::domain::shared::value_objects::UserId;

use crate::api::error::ErrorResponse;
use crate::config::auth_config::AuthConfig;

/// Capability every cart endpoint requires.
pub const READ_CAPABILITY: &str = "read";

#[derive(Debug, Serialize, Deserialize)]
pub struct CartClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub capabilities: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("auth.invalid_token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("auth.empty_subject")]
    EmptySubject,
    #[error("auth.missing_capability: {0}")]
    MissingCapability(String),
}

/// Verifies HS256 bearer tokens issued by the identity provider.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = decode::<CartClaims>(token, &self.key, &self.validation)?.claims;
        if claims.sub.trim().is_empty() {
            return Err(AuthError::EmptySubject);
        }

        Ok(AuthenticatedUser {
            user_id: UserId::new(claims.sub),
            capabilities: claims.capabilities,
        })
    }
}

/// Lets `user` through only when it holds `capability`.
pub fn authorize(user: AuthenticatedUser, capability: &str) -> Result<AuthenticatedUser, AuthError> {
    if user.has_capability(capability) {
        Ok(user)
    } else {
        Err(AuthError::MissingCapability(capability.to_string()))
    }
}

const UNAUTHORIZED_MESSAGE: &str = "A valid bearer token is required";

fn error_body(status: StatusCode, code: &str, message: &str) -> Response {
    (status, poem::web::Json(ErrorResponse::new(code, message))).into_response()
}

fn rejection(status: StatusCode, code: &str, message: &str) -> poem::Error {
    poem::Error::from_response(error_body(status, code, message))
}

/// Answers requests without usable bearer credentials (no `Authorization`
/// header, or another scheme) with the same envelope as a rejected token.
/// Install with `catch_error` on the route serving the cart API.
pub async fn missing_credentials(_: AuthorizationError) -> Response {
    error_body(StatusCode::UNAUTHORIZED, "unauthorized", UNAUTHORIZED_MESSAGE)
}

/// Bearer token of a caller holding the `read` capability.
///
/// Declaring it as a handler argument is the authorization requirement:
/// poem-openapi runs the checker before the handler body, answering 401 for
/// a missing or invalid token and 403 for a valid token without the
/// capability.
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT", checker = "cart_reader_checker")]
pub struct CartReader(pub AuthenticatedUser);

async fn cart_reader_checker(req: &Request, bearer: Bearer) -> poem::Result<AuthenticatedUser> {
    let verifier = req.data::<Arc<TokenVerifier>>().ok_or_else(|| {
        tracing::error!("Token verifier is not registered on the route");
        rejection(
            StatusCode::INTERNAL_SERVER_ERROR,
            "cart_operation_failed",
            "The cart operation could not be completed",
        )
    })?;

    let user = verifier.verify(&bearer.token).map_err(|e| {
        tracing::warn!("Cart auth failed: {e}");
        rejection(StatusCode::UNAUTHORIZED, "unauthorized", UNAUTHORIZED_MESSAGE)
    })?;

    authorize(user, READ_CAPABILITY).map_err(|e| {
        tracing::warn!("Cart access denied: {e}");
        rejection(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Sorry, you are not allowed to do that",
        )
    })
}
