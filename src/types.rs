/// Shared types used across the codebase

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated principal returned by the auth service for a valid token.
/// Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
}

/// Username/password pair for signup and login.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

// Keep passwords out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer credential minted by the auth service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "access_token")]
    pub value: String,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Owner and id of a document held by the file service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub owner: String,
    pub id: String,
}

impl DocumentRef {
    pub fn new(owner: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.id)
    }
}

/// Backend response body relayed byte for byte, with its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl Payload {
    pub fn new(content_type: Option<HeaderValue>, body: Bytes) -> Self {
        Self { content_type, body }
    }

    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::new(Some(HeaderValue::from_static("application/json")), body.into())
    }
}

// Always 200: failures never become a Payload
impl IntoResponse for Payload {
    fn into_response(self) -> Response {
        match self.content_type {
            Some(content_type) => {
                (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
            }
            None => {
                let mut response = (StatusCode::OK, self.body).into_response();
                response.headers_mut().remove(header::CONTENT_TYPE);
                response
            }
        }
    }
}
