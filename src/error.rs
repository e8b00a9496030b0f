// Gateway Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::fmt;

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure classes shared by every gateway component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 400 Bad Request
    BadRequest,

    // 401 Unauthorized
    Unauthorized,

    // 403 Forbidden
    Forbidden,

    // 404 Not Found
    NotFound,

    // 500 Internal Server Error
    InternalServerError,

    // 502 Bad Gateway (upstream unreachable)
    UpstreamUnavailable,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::InternalServerError => 500,
            ErrorKind::UpstreamUnavailable => 502,
        }
    }

    /// Error code for logs and client handling
    pub fn error_code(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }
}

/// Structured error crossing every component boundary of the gateway.
///
/// The kind decides the HTTP status, the message is what the client sees,
/// and the optional cause keeps the underlying error for logs only.
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    cause: Option<Cause>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the lower-level error that produced this one
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamUnavailable, message)
    }

    /// Classify an upstream HTTP status (>= 400) into a taxonomy kind
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            _ => ErrorKind::InternalServerError,
        };
        Self::new(kind, message)
    }

    /// Turn a `NotFound` into an `InternalServerError` for calls where a 404
    /// has no meaning to the client. Every other kind is kept as is.
    pub fn reclassify_not_found(self, context: &str) -> Self {
        if self.kind != ErrorKind::NotFound {
            return self;
        }
        Self {
            kind: ErrorKind::InternalServerError,
            message: format!("{}: {}", context, self.message),
            cause: self.cause,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if let Some(cause) = &self.cause {
            tracing::debug!(code = self.error_code(), "request failed: {} ({})", self.message, cause);
        }
        (status, Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
