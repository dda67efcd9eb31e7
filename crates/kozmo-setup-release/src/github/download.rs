//! Streaming download of GitHub release assets

use kozmo_setup_core::SetupError;
use reqwest::blocking::Client;
use std::io::Write;
use thiserror::Error;
use url::Url;

/// Streams the body at `url` into `writer`
///
/// # Returns
///
/// Number of bytes written
///
/// # Errors
///
/// Returns error if:
/// - HTTP request fails
/// - Response status is not success
/// - I/O error while reading the body or writing it out
pub fn download_to_writer<W: Write>(
    client: &Client,
    url: &Url,
    writer: &mut W,
) -> Result<u64, DownloadError> {
    let mut response = client.get(url.as_str()).send()?;

    if let Err(err) = response.error_for_status_ref() {
        return Err(DownloadError::HttpError {
            url: url.clone(),
            source: err.without_url(),
        });
    }

    let downloaded = std::io::copy(&mut response, writer)?;
    writer.flush()?;
    Ok(downloaded)
}

/// Download error types
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HTTP error status while downloading
    #[error("HTTP error downloading {url}: {source}")]
    HttpError {
        /// URL that failed
        url: Url,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// I/O error during download
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl From<DownloadError> for SetupError {
    fn from(err: DownloadError) -> Self {
        SetupError::DownloadFailed(err.to_string())
    }
}
