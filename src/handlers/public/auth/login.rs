// handlers/public/auth/login.rs - POST /api/v1/login handler

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{Credentials, Token};

use super::credentials_from;

/// POST /api/v1/login - exchange credentials for a token
///
/// Bad credentials come back as the auth service's own 401 and message.
pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<Token>> {
    let credentials = credentials_from(body)?;
    let token = state.auth().login(&credentials).await?;
    Ok(Json(token))
}
