//! URL construction helpers for GitHub resources

use kozmo_setup_core::SetupError;
use thiserror::Error;
use url::Url;

/// Parses an API base URL, e.g. `GITHUB_API_URL` of a GitHub Enterprise runner
///
/// # Errors
///
/// Returns error if the value is not an absolute URL that can carry path segments
pub fn parse_api_base_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(UrlError::CannotBeABase { url });
    }
    Ok(url)
}

/// Helper to safely append path segments to URL
///
/// Segments are percent-encoded, so a segment can never introduce `/` or `..`.
/// Any path already on `url` (such as `/api/v3`) is kept.
///
/// # Errors
///
/// Returns error if URL cannot be a base
pub fn add_path_segments(url: &mut Url, segments: &[&str]) -> Result<(), UrlError> {
    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// `{api}/repos/{owner}/{repo}/releases`
///
/// # Errors
///
/// Returns error if `api_base` cannot be a base
pub fn releases_url(api_base: &Url, owner: &str, repo: &str) -> Result<Url, UrlError> {
    let mut url = api_base.clone();
    add_path_segments(&mut url, &["repos", owner, repo, "releases"])?;
    Ok(url)
}

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// URL cannot be used as a base
    #[error("URL cannot be a base: {url}")]
    CannotBeABase {
        /// The problematic URL
        url: Url,
    },

    /// Invalid URL parse error
    #[error("Invalid URL: {0}")]
    ParseError(#[from] url::ParseError),
}

impl From<UrlError> for SetupError {
    fn from(err: UrlError) -> Self {
        SetupError::FeedFetchFailed(err.to_string())
    }
}
