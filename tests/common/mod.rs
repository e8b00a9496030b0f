#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seg_red_broker::router;
use seg_red_broker::services::{AuthService, FileService};
use seg_red_broker::state::AppState;

/// Gateway served in-process, wired to mock auth and file backends
pub struct TestGateway {
    pub base_url: String,
    pub auth: MockServer,
    pub files: MockServer,
    pub client: reqwest::Client,
}

impl TestGateway {
    pub async fn start() -> Result<Self> {
        let auth = MockServer::start().await;
        let files = MockServer::start().await;
        let auth_url = Url::parse(&auth.uri())?;
        let files_url = Url::parse(&files.uri())?;
        Self::start_with(auth, auth_url, files, files_url).await
    }

    /// Gateway whose auth service URL points at a port nobody listens on
    pub async fn start_with_unreachable_auth() -> Result<Self> {
        let auth = MockServer::start().await;
        let files = MockServer::start().await;
        let files_url = Url::parse(&files.uri())?;
        Self::start_with(auth, dead_url()?, files, files_url).await
    }

    /// Gateway whose file service URL points at a port nobody listens on
    pub async fn start_with_unreachable_files() -> Result<Self> {
        let auth = MockServer::start().await;
        let files = MockServer::start().await;
        let auth_url = Url::parse(&auth.uri())?;
        Self::start_with(auth, auth_url, files, dead_url()?).await
    }

    async fn start_with(
        auth: MockServer,
        auth_url: Url,
        files: MockServer,
        files_url: Url,
    ) -> Result<Self> {
        let state = AppState::new(
            Arc::new(AuthService::new(auth_url)),
            Arc::new(FileService::new(files_url)),
        );

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind gateway listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router::app(state)).await;
        });

        let gateway = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            auth,
            files,
            client: reqwest::Client::new(),
        };
        gateway.wait_ready(Duration::from_secs(5)).await?;
        Ok(gateway)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("gateway did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make the auth mock accept `token` as belonging to `username`.
    /// Any other token is answered with 401.
    pub async fn accept_token(&self, token: &str, username: &str) {
        Mock::given(method("POST"))
            .and(path("/checkToken"))
            .and(header("authorization", token))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": username })))
            .with_priority(1)
            .mount(&self.auth)
            .await;

        Mock::given(method("POST"))
            .and(path("/checkToken"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "invalid token" })))
            .with_priority(10)
            .mount(&self.auth)
            .await;
    }

    pub async fn auth_calls(&self) -> usize {
        self.auth.received_requests().await.map(|r| r.len()).unwrap_or(0)
    }

    pub async fn file_calls(&self) -> usize {
        self.files.received_requests().await.map(|r| r.len()).unwrap_or(0)
    }
}

/// Address on a free port that nothing is bound to
fn dead_url() -> Result<Url> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(Url::parse(&format!("http://127.0.0.1:{}", port))?)
}
