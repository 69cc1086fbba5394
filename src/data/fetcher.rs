//! Source fetcher abstraction.
//!
//! This module defines the [`SourceFetcher`] trait that abstracts over how a
//! single dataset candidate is retrieved. The cache only sees payload text or a
//! per-source error; whether that came from disk or the network is the
//! fetcher's business.

use super::source::Source;
use crate::domain::error::{Result, SurveyError};
use async_trait::async_trait;
use std::time::Duration;

/// HTTP request timeout for remote candidates.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves the raw payload of one source candidate.
///
/// Implementations report any failure (missing file, transport error,
/// non-success status) as an `Err`; the cache treats every error as
/// "try the next candidate".
///
/// # Implementations
///
/// - [`DefaultFetcher`]: local files via `tokio::fs`, URLs via `reqwest`
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetches the payload text for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Source`] describing why the candidate failed.
    async fn fetch(&self, source: &Source) -> Result<String>;
}

/// Fetcher for local paths and remote URLs.
#[derive(Debug, Clone)]
pub struct DefaultFetcher {
    client: reqwest::Client,
}

impl DefaultFetcher {
    /// Creates a fetcher with a shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Config`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("survey-lens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SurveyError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Creates a fetcher around a preconfigured HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_url(&self, url: &str) -> Result<String> {
        let source_error = |reason: String| SurveyError::Source {
            location: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| source_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(source_error(format!("HTTP {}", status.as_u16())));
        }

        response.text().await.map_err(|e| source_error(e.to_string()))
    }
}

#[async_trait]
impl SourceFetcher for DefaultFetcher {
    async fn fetch(&self, source: &Source) -> Result<String> {
        match source {
            Source::Path(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                SurveyError::Source {
                    location: path.display().to_string(),
                    reason: e.to_string(),
                }
            }),
            Source::Url(url) => self.fetch_url(url).await,
        }
    }
}
