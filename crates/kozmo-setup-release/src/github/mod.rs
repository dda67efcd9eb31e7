//! Shared GitHub interaction utilities
//!
//! This module provides common functionality for interacting with GitHub:
//! - HTTP client construction with appropriate user-agent and timeouts
//! - Streaming downloads of release assets
//! - Safe URL construction helpers
//! - The release feed source used by the resolver

pub mod client;
pub mod download;
pub mod feed;
pub mod url;

// Re-exports for convenient access
pub use client::{
    DOWNLOAD_TIMEOUT, FEED_TIMEOUT, USER_AGENT, build_client, download_client, feed_client,
};
pub use download::{DownloadError, download_to_writer};
pub use feed::{GitHubReleases, ReleaseSource};
pub use url::{UrlError, add_path_segments, parse_api_base_url, releases_url};
