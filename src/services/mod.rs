pub mod auth_service;
pub mod file_service;

pub use auth_service::{AuthGateway, AuthService};
pub use file_service::{FileGateway, FileService};
