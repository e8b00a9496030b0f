// handlers/protected/document/record.rs - /api/v1/:username/:doc_id handlers

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::middleware::authorize;
use crate::state::AppState;
use crate::types::{DocumentRef, Payload};

use super::utils::{document_ref, path_error, require_owner};

type DocPath = Result<Path<(String, String)>, PathRejection>;

/// Validate the path, authenticate the caller and check ownership.
/// Nothing reaches the file service unless this succeeds.
async fn owned_document(state: &AppState, path: DocPath, headers: &HeaderMap) -> ApiResult<DocumentRef> {
    let Path((username, doc_id)) = path.map_err(path_error)?;
    let doc = document_ref(username, doc_id)?;
    let identity = authorize(state.auth(), headers).await?;
    require_owner(&identity, &doc.owner)?;
    Ok(doc)
}

fn request_body(body: Result<Bytes, BytesRejection>) -> ApiResult<Bytes> {
    body.map_err(|e| ApiError::bad_request("invalid request body").with_cause(e))
}

/// GET /api/v1/:username/:doc_id - fetch document content as stored
pub async fn get(State(state): State<AppState>, path: DocPath, headers: HeaderMap) -> ApiResult<Payload> {
    let doc = owned_document(&state, path, &headers).await?;
    state.files().get_file(&doc).await
}

/// POST /api/v1/:username/:doc_id - create a document from the raw body
pub async fn post(
    State(state): State<AppState>,
    path: DocPath,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Payload> {
    let doc = owned_document(&state, path, &headers).await?;
    let content = request_body(body)?;
    let size = state.files().create_file(&doc, content).await?;
    tracing::info!(document = %doc, "document created");
    Ok(size)
}

/// PUT /api/v1/:username/:doc_id - replace a document with the raw body
pub async fn put(
    State(state): State<AppState>,
    path: DocPath,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Payload> {
    let doc = owned_document(&state, path, &headers).await?;
    let content = request_body(body)?;
    let size = state.files().update_file(&doc, content).await?;
    tracing::info!(document = %doc, "document updated");
    Ok(size)
}

/// DELETE /api/v1/:username/:doc_id
pub async fn delete(State(state): State<AppState>, path: DocPath, headers: HeaderMap) -> ApiResult<Json<Value>> {
    let doc = owned_document(&state, path, &headers).await?;
    state.files().delete_file(&doc).await?;
    tracing::info!(document = %doc, "document deleted");
    Ok(Json(json!({})))
}

/// Any verb on /api/v1/:username/ - the document id segment is empty
///
/// Rejected before any backend call, the same way a blank `doc_id` is.
pub async fn without_id(path: Result<Path<String>, PathRejection>) -> ApiError {
    let Path(username) = match path {
        Ok(path) => path,
        Err(rejection) => return path_error(rejection),
    };
    document_ref(username, String::new())
        .err()
        .unwrap_or_else(|| ApiError::bad_request("doc_id cannot be empty"))
}
