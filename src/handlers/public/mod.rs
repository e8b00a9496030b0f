// handlers/public/mod.rs - Public handlers (no token required)
//
// Token acquisition and token inspection, plus the gateway's own
// version/health endpoints. None of these touch the file service.

pub mod auth;
pub mod broker;

pub use auth::*;
pub use broker::*;
