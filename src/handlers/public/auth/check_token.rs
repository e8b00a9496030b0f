// handlers/public/auth/check_token.rs - POST /api/v1/checkToken handler

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::error::ApiResult;
use crate::middleware::authorize;
use crate::state::AppState;
use crate::types::Identity;

/// POST /api/v1/checkToken - report which user the `Authorization` token belongs to
///
/// Output: `{"username": "..."}`. An unreachable auth service is a 502,
/// not a 401.
pub async fn check_token_post(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Identity>> {
    let identity = authorize(state.auth(), &headers).await?;
    Ok(Json(identity))
}
