// handlers/public/broker.rs - Gateway self-description endpoints

use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;

/// GET /api/v1/version
pub async fn version_get() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}

/// GET /health - liveness of the gateway process only; upstreams are not probed
pub async fn health_get() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

/// Fallback for unmatched routes, keeping the `{"error": ...}` shape
pub async fn no_route() -> ApiError {
    ApiError::not_found("route not found")
}
