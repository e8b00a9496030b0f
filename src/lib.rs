pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;
pub mod types;
pub mod upstream;

#[cfg(test)]
pub mod testing;
