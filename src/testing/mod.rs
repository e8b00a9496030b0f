use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Map, Value};
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{ApiError, ApiResult};
use crate::services::{AuthGateway, FileGateway};
use crate::state::AppState;
use crate::types::{Credentials, DocumentRef, Identity, Payload, Token};

/// In-memory auth backend: tokens are `token-<username>`
#[derive(Default)]
pub struct FakeAuth {
    passwords: Mutex<HashMap<String, String>>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that fails every call as unreachable
    pub fn unreachable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.passwords
            .lock()
            .unwrap()
            .insert(username.to_string(), password.to_string());
        self
    }

    pub fn token_for(username: &str) -> String {
        format!("token-{}", username)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(ApiError::upstream_unavailable("auth service is unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn signup(&self, credentials: &Credentials) -> ApiResult<Token> {
        self.enter()?;
        let mut passwords = self.passwords.lock().unwrap();
        if passwords.contains_key(&credentials.username) {
            return Err(ApiError::bad_request("user already exists"));
        }
        passwords.insert(credentials.username.clone(), credentials.password.clone());
        Ok(Token {
            value: Self::token_for(&credentials.username),
        })
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<Token> {
        self.enter()?;
        let passwords = self.passwords.lock().unwrap();
        match passwords.get(&credentials.username) {
            Some(password) if *password == credentials.password => Ok(Token {
                value: Self::token_for(&credentials.username),
            }),
            _ => Err(ApiError::unauthorized("invalid credentials")),
        }
    }

    async fn validate_token(&self, token: &str) -> ApiResult<Identity> {
        self.enter()?;
        let username = token
            .strip_prefix("token-")
            .ok_or_else(|| ApiError::unauthorized("invalid token"))?;
        if !self.passwords.lock().unwrap().contains_key(username) {
            return Err(ApiError::unauthorized("invalid token"));
        }
        Ok(Identity {
            username: username.to_string(),
        })
    }
}

/// In-memory file backend recording every call it receives
#[derive(Default)]
pub struct FakeFiles {
    docs: Mutex<HashMap<(String, String), Bytes>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(self, owner: &str, id: &str, content: &str) -> Self {
        self.docs.lock().unwrap().insert(
            (owner.to_string(), id.to_string()),
            Bytes::copy_from_slice(content.as_bytes()),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn key(doc: &DocumentRef) -> (String, String) {
        (doc.owner.clone(), doc.id.clone())
    }

    fn store(&self, doc: &DocumentRef, content: Bytes) -> Payload {
        let size = content.len();
        self.docs.lock().unwrap().insert(Self::key(doc), content);
        Payload::json(json!({ "size": size }).to_string())
    }
}

#[async_trait]
impl FileGateway for FakeFiles {
    async fn get_file(&self, doc: &DocumentRef) -> ApiResult<Payload> {
        self.record(format!("get {}", doc));
        let docs = self.docs.lock().unwrap();
        let content = docs
            .get(&Self::key(doc))
            .ok_or_else(|| ApiError::not_found("document not found"))?;
        Ok(Payload::new(None, content.clone()))
    }

    async fn create_file(&self, doc: &DocumentRef, content: Bytes) -> ApiResult<Payload> {
        self.record(format!("create {}", doc));
        if self.docs.lock().unwrap().contains_key(&Self::key(doc)) {
            return Err(ApiError::from_status(409, "document already exists"));
        }
        Ok(self.store(doc, content))
    }

    async fn update_file(&self, doc: &DocumentRef, content: Bytes) -> ApiResult<Payload> {
        self.record(format!("update {}", doc));
        if !self.docs.lock().unwrap().contains_key(&Self::key(doc)) {
            return Err(ApiError::not_found("document not found"));
        }
        Ok(self.store(doc, content))
    }

    async fn delete_file(&self, doc: &DocumentRef) -> ApiResult<()> {
        self.record(format!("delete {}", doc));
        self.docs
            .lock()
            .unwrap()
            .remove(&Self::key(doc))
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found("document not found"))
    }

    async fn list_docs(&self, owner: &str) -> ApiResult<Payload> {
        self.record(format!("list {}", owner));
        let docs = self.docs.lock().unwrap();
        let listing: Map<String, Value> = docs
            .iter()
            .filter(|((doc_owner, _), _)| doc_owner == owner)
            .map(|((_, id), content)| (id.clone(), json!(content.len().to_string())))
            .collect();
        Ok(Payload::json(Value::Object(listing).to_string()))
    }
}

/// Gateway state wired to the given fakes, keeping handles for assertions
pub fn fake_state(auth: FakeAuth, files: FakeFiles) -> (AppState, Arc<FakeAuth>, Arc<FakeFiles>) {
    let auth = Arc::new(auth);
    let files = Arc::new(files);
    let state = AppState::new(auth.clone(), files.clone());
    (state, auth, files)
}

/// Captures formatted tracing output for assertions on what gets logged
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install as the thread's default subscriber until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
