//! Shared JSON-over-HTTP client for the AURA API.
//!
//! Success is decided by the HTTP status alone. A non-2xx body is kept as
//! text for diagnostics; no structured error schema is parsed.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use aura_types::config::ClientConfig;
use aura_types::error::BackendError;

/// Thin wrapper over `reqwest::Client` bound to one base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. `timeout` of `None` waits forever.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Self::new(
            config.base_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `body` as JSON to `path` and decode the JSON reply.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        decode(response).await
    }

    /// POST `body` as JSON to `path`, succeeding on any 2xx. The reply body
    /// is ignored.
    pub async fn post_for_status<B>(&self, path: &str, body: &B) -> Result<(), BackendError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        check_status(response).await.map(drop)
    }

    /// GET `path` and decode the JSON reply.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, BackendError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        decode(response).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, BackendError> {
    check_status(response)
        .await?
        .json::<R>()
        .await
        .map_err(|e| BackendError::Deserialization(format!("failed to parse response: {e}")))
}

fn map_reqwest_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Transport(e.to_string())
    }
}
