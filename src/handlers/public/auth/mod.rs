// handlers/public/auth/mod.rs - Token endpoints proxied to the auth service

pub mod check_token; // POST /api/v1/checkToken - resolve the identity behind a token
pub mod login;       // POST /api/v1/login - exchange credentials for a token
pub mod signup;      // POST /api/v1/signup - register and receive a token

pub use check_token::check_token_post;
pub use login::login_post;
pub use signup::signup_post;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{ApiError, ApiResult};
use crate::types::Credentials;

/// Validate a signup/login body before it is forwarded
pub(crate) fn credentials_from(body: Result<Json<Credentials>, JsonRejection>) -> ApiResult<Credentials> {
    let Json(credentials) = body.map_err(|e| {
        tracing::debug!("unreadable credentials body: {}", e);
        ApiError::bad_request("error when mapping request").with_cause(e)
    })?;

    if !credentials.is_complete() {
        return Err(ApiError::bad_request("username and password are required"));
    }
    Ok(credentials)
}
