use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("configuration already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub upstream: UpstreamConfig,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub auth_service_url: Url,
    pub file_service_url: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub certs_folder: Option<PathBuf>,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
}

/// Profile defaults before the upstream URLs are known
struct Profile {
    server: ServerConfig,
    api: ApiConfig,
    security: SecurityConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let upstream = UpstreamConfig {
            auth_service_url: required_url("AUTH_SERVICE_URL")?,
            file_service_url: required_url("FILE_SERVICE_URL")?,
        };

        // Set defaults based on environment, then override with specific env vars
        let profile = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        Self {
            environment,
            upstream,
            server: profile.server,
            api: profile.api,
            security: profile.security,
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value: v })?;
        }
        if let Ok(v) = env::var("CERTS_FOLDER") {
            if !v.trim().is_empty() {
                self.server.certs_folder = Some(PathBuf::from(v));
            }
        }
        if let Ok(v) = env::var("LOG_LEVEL") {
            self.server.log_level = v;
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = parse_origins(&v);
        }

        Ok(self)
    }

    /// Certificate and key paths when TLS is enabled
    pub fn tls_paths(&self) -> Option<(PathBuf, PathBuf)> {
        self.server
            .certs_folder
            .as_ref()
            .map(|dir| (dir.join("mycert.crt"), dir.join("mycert.key")))
    }

    fn development() -> Profile {
        Profile {
            server: ServerConfig {
                port: 8080,
                certs_folder: None,
                log_level: "debug".to_string(),
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
            },
        }
    }

    fn staging() -> Profile {
        Profile {
            server: ServerConfig {
                port: 8080,
                certs_folder: None,
                log_level: "info".to_string(),
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Profile {
        Profile {
            server: ServerConfig {
                port: 8080,
                certs_folder: None,
                log_level: "info".to_string(),
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

fn required_url(name: &'static str) -> Result<Url, ConfigError> {
    let raw = env::var(name).map_err(|_| ConfigError::Missing(name))?;
    parse_base_url(name, &raw)
}

/// Parse an upstream base URL; only absolute http(s) URLs are accepted
pub fn parse_base_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            name,
            reason: format!("unsupported base URL '{}'", raw),
        });
    }
    Ok(url)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Global singleton config - installed once at startup
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Load configuration from the environment and install it globally
pub fn init() -> Result<&'static AppConfig, ConfigError> {
    let config = AppConfig::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    CONFIG.get().ok_or(ConfigError::AlreadyInitialized)
}

/// Accessor for the installed configuration, `None` before `init`
pub fn config() -> Option<&'static AppConfig> {
    CONFIG.get()
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!(
            $crate::config::config().map(|c| c.environment),
            Some($crate::config::Environment::Production)
        )
    };
}
