use axum::http::{header, HeaderMap};

use crate::error::{ApiError, ApiResult};
use crate::services::AuthGateway;
use crate::types::Identity;

pub const MISSING_AUTHORIZATION: &str = "authorization header is required";

/// Token state of an inbound request before the auth service is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState<'a> {
    NoToken,
    TokenPresent(&'a str),
}

impl<'a> AuthState<'a> {
    /// Read the `Authorization` header. An empty value counts as no token.
    pub fn from_headers(headers: &'a HeaderMap) -> ApiResult<Self> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Ok(AuthState::NoToken);
        };

        let value = value
            .to_str()
            .map_err(|_| ApiError::unauthorized("invalid authorization header"))?;

        if value.trim().is_empty() {
            Ok(AuthState::NoToken)
        } else {
            Ok(AuthState::TokenPresent(value))
        }
    }
}

/// Resolve the caller's identity, or the error that ends the request.
///
/// Runs before any handler touches the file service. The header value is
/// handed to the auth service verbatim; whatever that call fails with
/// (including an unreachable backend) is returned unchanged.
pub async fn authorize(auth: &dyn AuthGateway, headers: &HeaderMap) -> ApiResult<Identity> {
    match AuthState::from_headers(headers)? {
        AuthState::NoToken => {
            tracing::debug!("rejected request without authorization header");
            Err(ApiError::unauthorized(MISSING_AUTHORIZATION))
        }
        AuthState::TokenPresent(token) => match auth.validate_token(token).await {
            Ok(identity) => Ok(identity),
            Err(e) => {
                tracing::debug!(code = e.error_code(), "token rejected: {}", e);
                Err(e)
            }
        },
    }
}
