use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{AuthGateway, AuthService, FileGateway, FileService};

/// Shared application state: the two upstream capabilities, injected once
/// at construction. Holds nothing mutable.
#[derive(Clone)]
pub struct AppState {
    auth: Arc<dyn AuthGateway>,
    files: Arc<dyn FileGateway>,
}

impl AppState {
    pub fn new(auth: Arc<dyn AuthGateway>, files: Arc<dyn FileGateway>) -> Self {
        Self { auth, files }
    }

    /// HTTP-backed gateways pointed at the configured upstream URLs
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(AuthService::new(config.upstream.auth_service_url.clone())),
            Arc::new(FileService::new(config.upstream.file_service_url.clone())),
        )
    }

    pub fn auth(&self) -> &dyn AuthGateway {
        self.auth.as_ref()
    }

    pub fn files(&self) -> &dyn FileGateway {
        self.files.as_ref()
    }
}
