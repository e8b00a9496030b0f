// handlers/public/auth/signup.rs - POST /api/v1/signup handler

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{Credentials, Token};

use super::credentials_from;

/// POST /api/v1/signup - register a user with the auth service
///
/// Input: `{"username": "...", "password": "..."}`
/// Output: `{"access_token": "..."}`
///
/// Policy failures (duplicate user, weak password) are whatever the auth
/// service reports; they are returned unchanged.
pub async fn signup_post(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<Token>> {
    let credentials = credentials_from(body)?;
    let token = state.auth().signup(&credentials).await?;
    Ok(Json(token))
}
