// handlers/protected/mod.rs - Protected handlers (token required)
//
// Security Level: token validated by the auth service on every request
// Route Prefix: /api/v1/:username/...
// Ownership: the :username path segment must equal the validated identity

pub mod document;

pub use document::*;
