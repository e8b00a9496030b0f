pub mod auth;

pub use auth::{authorize, AuthState};
