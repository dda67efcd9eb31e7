//! Release feed source
//!
//! The resolver only needs the ordered list of releases of one repository.
//! [`ReleaseSource`] is that seam; [`GitHubReleases`] reads it from the
//! GitHub REST API.

use kozmo_setup_core::{Result, SetupError};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::github::client::feed_client;
use crate::github::url::{parse_api_base_url, releases_url};
use crate::install::release::Release;

/// Provides the releases of a repository, newest first
pub trait ReleaseSource {
    /// Lists releases of `owner/repo` in upstream order
    ///
    /// # Errors
    ///
    /// Returns `SetupError::FeedFetchFailed` when the feed cannot be read
    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>>;
}

impl<T: ReleaseSource + ?Sized> ReleaseSource for &T {
    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>> {
        (**self).list_releases(owner, repo)
    }
}

/// Unauthenticated reader of `GET /repos/{owner}/{repo}/releases`
///
/// Only the first page the API returns is read; no retries are made.
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    client: Client,
    api_base: Url,
}

impl GitHubReleases {
    pub fn new(client: Client, api_base: Url) -> Self {
        Self { client, api_base }
    }

    /// Client with default timeout against `api_url` (e.g. `GITHUB_API_URL`)
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        let api_base = parse_api_base_url(api_url).map_err(|e| SetupError::ConfigInvalidValue {
            field: "GITHUB_API_URL".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(default_client()?, api_base))
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }
}

fn default_client() -> Result<Client> {
    feed_client()
        .map_err(|e| SetupError::FeedFetchFailed(format!("failed to build HTTP client: {}", e)))
}

impl ReleaseSource for GitHubReleases {
    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>> {
        let url = releases_url(&self.api_base, owner, repo)?;
        debug!(%url, "Fetching release feed");

        let response = self
            .client
            .get(url.as_str())
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| {
                SetupError::FeedFetchFailed(format!("request to {} failed: {}", url, e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::FeedFetchFailed(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let releases: Vec<Release> = response.json().map_err(|e| {
            SetupError::FeedFetchFailed(format!("failed to parse release list from {}: {}", url, e))
        })?;

        debug!(count = releases.len(), "Release feed fetched");
        Ok(releases)
    }
}
