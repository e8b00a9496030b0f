// handlers/protected/document/all_docs.rs - GET /api/v1/:username/_all_docs handler

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;

use crate::error::ApiResult;
use crate::middleware::authorize;
use crate::state::AppState;
use crate::types::Payload;

use super::utils::{path_error, require_owner, require_param};

/// GET /api/v1/:username/_all_docs - list the caller's documents
///
/// Output is the file service's listing (`{docId: metadata, ...}`) as-is.
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> ApiResult<Payload> {
    let Path(username) = path.map_err(path_error)?;
    let owner = require_param("username", username)?;
    let identity = authorize(state.auth(), &headers).await?;
    require_owner(&identity, &owner)?;

    state.files().list_docs(&owner).await
}
