//! HTTP submission source backed by the admin API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::FetchError;
use crate::source::{SubmissionQuery, SubmissionSource};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Fetches submissions with a single GET against the admin API.
pub struct HttpSource {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpSource {
    /// Create a source for `base_url` with the default 60-second timeout.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a source with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url.trim()
        };
        let base_url =
            Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!("{base}: cannot carry a path")));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                FetchError::ConnectionFailed(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full endpoint URL for a query, query string included.
    pub fn endpoint(&self, query: &SubmissionQuery) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FetchError::InvalidUrl(format!("{}: cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(query.path_segments());
        }
        url.query_pairs_mut().extend_pairs(query.query_params());
        Ok(url)
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else if e.is_connect() {
            FetchError::ConnectionFailed(format!(
                "could not reach {}. Is the server running?",
                self.base_url
            ))
        } else {
            FetchError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl SubmissionSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(
        skip(self, query),
        fields(owner = %query.master_repo_owner, student = ?query.student)
    )]
    async fn fetch(&self, query: &SubmissionQuery) -> Result<Value, FetchError> {
        let url = self.endpoint(query)?;
        info!(%url, "fetching submissions");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!(status, bytes = body.len(), "received response");

        if status >= 400 {
            return Err(FetchError::Http { status, body });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::InvalidJson(e.to_string()))
    }
}
