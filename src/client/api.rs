use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;

use crate::domain::task::{CreateTask, DeleteConfirmation, Task, TaskId, UpdateTask};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// The four store operations as seen from the client.
#[async_trait]
pub trait TaskApi: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Task>, ClientError>;
    async fn create(&self, input: CreateTask) -> Result<Task, ClientError>;
    async fn update(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>, ClientError>;
    async fn delete(&self, id: TaskId) -> Result<DeleteConfirmation, ClientError>;
}

#[derive(Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    collection_url: String,
}

impl HttpTaskApi {
    /// `collection_url` points at the `/tasks` collection.
    pub fn new(collection_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), collection_url)
    }

    pub fn with_client(http: reqwest::Client, collection_url: impl Into<String>) -> Self {
        let collection_url = collection_url.into().trim_end_matches('/').to_string();
        Self { http, collection_url }
    }

    fn item_url(&self, id: TaskId) -> String { format!("{}/{}", self.collection_url, id) }
}

async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let resp = self.http.get(&self.collection_url).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    async fn create(&self, input: CreateTask) -> Result<Task, ClientError> {
        let resp = self.http.post(&self.collection_url).json(&input).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    async fn update(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>, ClientError> {
        let resp = self.http.put(self.item_url(id)).json(&input).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    async fn delete(&self, id: TaskId) -> Result<DeleteConfirmation, ClientError> {
        let resp = self.http.delete(self.item_url(id)).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }
}
