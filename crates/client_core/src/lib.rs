use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Issue, error::ApiError, protocol::ISSUES_PATH};
use tracing::{debug, error, info};
use url::Url;

pub mod error;
pub mod filter;
pub mod tracker;

pub use error::{FetchError, ParseFilterError, TrackerError};
pub use filter::{derive, FilterState, SortOrder, StatusFilter};
pub use tracker::{status_tone, Intent, IssueTracker, LoadState, Navigator, StatusTone};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the full issue collection comes from.
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError>;
}

pub struct MissingIssueSource;

#[async_trait]
impl IssueSource for MissingIssueSource {
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError> {
        Err(FetchError::Status {
            status: 503,
            message: "issue source is unavailable".to_string(),
        })
    }
}

/// REST client for the issues API.
pub struct IssueClient {
    http: Client,
    base_url: Url,
}

impl IssueClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn issues_url(&self) -> Result<Url, FetchError> {
        self.base_url
            .join(ISSUES_PATH)
            .map_err(|source| FetchError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl IssueSource for IssueClient {
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError> {
        let url = self.issues_url()?;
        debug!(%url, "fetching issues");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ApiError::from_body(&body)
                .map(|api_error| api_error.summary())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Builds the HTTP source, or `MissingIssueSource` when the base URL is unusable so the
/// tracker still starts and shows its empty state.
pub fn build_issue_source(base_url: &str, timeout: Duration) -> Box<dyn IssueSource> {
    match IssueClient::with_timeout(base_url, timeout) {
        Ok(client) => {
            info!(url = %client.base_url(), "issues API configured");
            Box::new(client)
        }
        Err(err) => {
            error!(error = %err, "failed to build issues API client");
            Box::new(MissingIssueSource)
        }
    }
}

/// Parses `raw` and makes its path end in `/` so relative joins append to it.
fn normalize_base_url(raw: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| FetchError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
