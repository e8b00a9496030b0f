use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::ApiResult;
use crate::types::{DocumentRef, Payload};
use crate::upstream::{Call, UpstreamClient};

const SERVICE_NAME: &str = "file service";
const ALL_DOCS: &str = "_all_docs";

/// Capability interface over the file backend. Successful bodies come back
/// exactly as the backend sent them; the gateway does not look inside.
#[async_trait]
pub trait FileGateway: Send + Sync {
    async fn get_file(&self, doc: &DocumentRef) -> ApiResult<Payload>;

    async fn create_file(&self, doc: &DocumentRef, content: Bytes) -> ApiResult<Payload>;

    async fn update_file(&self, doc: &DocumentRef, content: Bytes) -> ApiResult<Payload>;

    async fn delete_file(&self, doc: &DocumentRef) -> ApiResult<()>;

    async fn list_docs(&self, owner: &str) -> ApiResult<Payload>;
}

/// `FileGateway` backed by the file service's HTTP API
#[derive(Debug, Clone)]
pub struct FileService {
    client: UpstreamClient,
}

impl FileService {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: UpstreamClient::new(SERVICE_NAME, base_url),
        }
    }
}

#[async_trait]
impl FileGateway for FileService {
    async fn get_file(&self, doc: &DocumentRef) -> ApiResult<Payload> {
        self.client
            .call_raw(Call::get(&[doc.owner.as_str(), doc.id.as_str()]))
            .await
    }

    async fn create_file(&self, doc: &DocumentRef, content: Bytes) -> ApiResult<Payload> {
        self.client
            .call_raw(Call::post(&[doc.owner.as_str(), doc.id.as_str()]).bytes(content))
            .await
    }

    async fn update_file(&self, doc: &DocumentRef, content: Bytes) -> ApiResult<Payload> {
        self.client
            .call_raw(Call::put(&[doc.owner.as_str(), doc.id.as_str()]).bytes(content))
            .await
    }

    async fn delete_file(&self, doc: &DocumentRef) -> ApiResult<()> {
        self.client
            .call_discard(Call::delete(&[doc.owner.as_str(), doc.id.as_str()]))
            .await
    }

    async fn list_docs(&self, owner: &str) -> ApiResult<Payload> {
        self.client.call_raw(Call::get(&[owner, ALL_DOCS])).await
    }
}
