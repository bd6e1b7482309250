//! # Admin Client
//!
//! Typed HTTP client for the record API, used by the `admin` CLI command.
//! It only speaks the public HTTP contract.
//!
//! ```ignore
//! let client = AdminClient::new("http://127.0.0.1:5000")?;
//! client.ensure_reachable().await?;
//! let created = client.create(&RecordDraft::new("Ada", "Engineering", 1200.0)).await?;
//! ```

mod errors;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{DeletedResponse, HealthResponse, MessageBody};
use crate::store::{Record, RecordId};

pub use errors::{ClientError, ClientResult};

/// Timeout for the reachability probe
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

/// Timeout for record operations
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Body for creating a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub name: String,
    pub category: String,
    pub amount: f64,
}

impl RecordDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            amount,
        }
    }
}

/// Body for updating a record; `None` fields are omitted from the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Client for one API base URL
#[derive(Debug, Clone)]
pub struct AdminClient {
    base_url: String,
    http: Client,
}

impl AdminClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder().build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let request = self.http.get(self.url("/health")).timeout(HEALTH_TIMEOUT);
        self.send(request).await
    }

    /// Probe `/health`, mapping any failure to `Unreachable`
    pub async fn ensure_reachable(&self) -> ClientResult<()> {
        match self.health().await {
            Ok(health) if health.status == "ok" => Ok(()),
            Ok(health) => Err(ClientError::Unreachable {
                base_url: self.base_url.clone(),
                reason: format!("health status '{}'", health.status),
            }),
            Err(err) => Err(ClientError::Unreachable {
                base_url: self.base_url.clone(),
                reason: err.to_string(),
            }),
        }
    }

    pub async fn list(&self) -> ClientResult<Vec<Record>> {
        let request = self.http.get(self.url("/records")).timeout(REQUEST_TIMEOUT);
        self.send(request).await
    }

    pub async fn create(&self, draft: &RecordDraft) -> ClientResult<Record> {
        let request = self
            .http
            .post(self.url("/records"))
            .json(draft)
            .timeout(REQUEST_TIMEOUT);
        self.send(request).await
    }

    pub async fn update(&self, id: RecordId, changes: &RecordChanges) -> ClientResult<Record> {
        let request = self
            .http
            .put(self.url(&format!("/records/{}", id)))
            .json(changes)
            .timeout(REQUEST_TIMEOUT);
        self.send(request).await
    }

    pub async fn delete(&self, id: RecordId) -> ClientResult<DeletedResponse> {
        let request = self
            .http
            .delete(self.url(&format!("/records/{}", id)))
            .timeout(REQUEST_TIMEOUT);
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageBody>(&body)
                .map(|m| m.message)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
