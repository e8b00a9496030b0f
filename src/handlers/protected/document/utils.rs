use axum::extract::rejection::PathRejection;

use crate::error::{ApiError, ApiResult};
use crate::types::{DocumentRef, Identity};

/// Non-empty path parameter, or a 400 naming it
pub fn require_param(name: &str, value: String) -> ApiResult<String> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{} cannot be empty", name)));
    }
    Ok(value)
}

/// Document reference from `/:username/:doc_id`
pub fn document_ref(username: String, doc_id: String) -> ApiResult<DocumentRef> {
    let owner = require_param("username", username)?;
    let id = require_param("doc_id", doc_id)?;
    Ok(DocumentRef { owner, id })
}

/// Users may only touch documents under their own name
pub fn require_owner(identity: &Identity, owner: &str) -> ApiResult<()> {
    if identity.username != owner {
        tracing::warn!(
            username = %identity.username,
            owner,
            "ownership check failed"
        );
        return Err(ApiError::forbidden("access to another user's documents is forbidden"));
    }
    Ok(())
}

pub fn path_error(rejection: PathRejection) -> ApiError {
    ApiError::bad_request("invalid input parameters").with_cause(rejection)
}
