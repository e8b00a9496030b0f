use async_trait::async_trait;
use url::Url;

use crate::error::ApiResult;
use crate::types::{Credentials, Identity, Token};
use crate::upstream::{Call, UpstreamClient};

const SERVICE_NAME: &str = "auth service";

/// Capability interface over the auth backend.
///
/// The gateway never mints or verifies tokens itself; it trusts whatever the
/// implementation reports.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Register a new user and return the token issued for it
    async fn signup(&self, credentials: &Credentials) -> ApiResult<Token>;

    /// Exchange credentials for a token
    async fn login(&self, credentials: &Credentials) -> ApiResult<Token>;

    /// Resolve the identity owning `token`. The value is forwarded as-is.
    async fn validate_token(&self, token: &str) -> ApiResult<Identity>;
}

/// `AuthGateway` backed by the auth service's HTTP API
#[derive(Debug, Clone)]
pub struct AuthService {
    client: UpstreamClient,
}

impl AuthService {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: UpstreamClient::new(SERVICE_NAME, base_url),
        }
    }

    /// Credentials are forwarded as given; callers reject incomplete ones
    async fn issue_token(&self, endpoint: &'static str, credentials: &Credentials) -> ApiResult<Token> {
        let call = Call::post(&[endpoint]).json(credentials)?;
        let token: Token = self
            .client
            .call(call)
            .await
            .map_err(|e| e.reclassify_not_found(SERVICE_NAME))?;

        tracing::info!(endpoint, "token issued");
        Ok(token)
    }
}

#[async_trait]
impl AuthGateway for AuthService {
    async fn signup(&self, credentials: &Credentials) -> ApiResult<Token> {
        self.issue_token("signup", credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<Token> {
        self.issue_token("login", credentials).await
    }

    async fn validate_token(&self, token: &str) -> ApiResult<Identity> {
        let identity: Identity = self
            .client
            .call(Call::post(&["checkToken"]).authorization(token))
            .await
            .map_err(|e| e.reclassify_not_found(SERVICE_NAME))?;

        tracing::debug!(username = %identity.username, "token validated");
        Ok(identity)
    }
}
