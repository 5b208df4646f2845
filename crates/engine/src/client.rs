//! HTTP client for the upstream token-indexing API.
//!
//! Issues exactly one GET per page and classifies the outcome. Retries and
//! failure tolerance live in the paginator, not here.

use std::future::Future;

use reqwest::header;
use serde_json::Value;
use thiserror::Error;

/// A single page fetch gone wrong.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Upstream client id is not configured")]
    MissingClientId,

    #[error("Upstream API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Abstraction over single-page fetching so the paginator can be driven by
/// scripted fakes in tests.
pub trait PageFetcher: Send + Sync {
    /// Fetch one page and parse the body as JSON.
    fn fetch_page(
        &self,
        url: &str,
        client_id: &str,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Production fetcher backed by a shared `reqwest` client.
///
/// Relies on the ambient connection timeout; no per-call override.
#[derive(Debug, Clone, Default)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl PageFetcher for UpstreamClient {
    async fn fetch_page(&self, url: &str, client_id: &str) -> Result<Value, FetchError> {
        if client_id.is_empty() {
            return Err(FetchError::MissingClientId);
        }

        let final_url = append_client_id(url, client_id);
        tracing::debug!(url = %final_url, "Requesting upstream page");

        let response = self
            .http
            .get(&final_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                url = %final_url,
                "Upstream API returned an error"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx body that is not valid JSON is still a fetch failure.
        Ok(response.json().await?)
    }
}

/// Append the client credential as a query parameter unless the URL already
/// carries one.
pub fn append_client_id(url: &str, client_id: &str) -> String {
    if url.contains("clientId=") {
        url.to_string()
    } else {
        format!("{url}&clientId={client_id}")
    }
}
