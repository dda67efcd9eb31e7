//! `reqwest` clients for the release feed and for archive downloads
//!
//! The two differ only in their timeout: the feed is a single small JSON
//! document, archives can be tens of megabytes on a slow runner.

use reqwest::blocking::Client;
use std::time::Duration;

/// Timeout for the release feed request
pub const FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for a whole release archive download
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// GitHub rejects API requests without a user agent
pub const USER_AGENT: &str = "kozmo-setup";

/// Blocking client sending [`USER_AGENT`], giving up after `timeout`
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

pub fn feed_client() -> reqwest::Result<Client> {
    build_client(FEED_TIMEOUT)
}

pub fn download_client() -> reqwest::Result<Client> {
    build_client(DOWNLOAD_TIMEOUT)
}
