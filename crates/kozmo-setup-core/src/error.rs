use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    // Configuration errors
    #[error("CONFIG_MISSING_INPUT: a {0} was not provided")]
    MissingInput(String),

    #[error("CONFIG_PARSE_ERROR: failed to parse {path}: {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Platform errors
    #[error(
        "PLATFORM_UNSUPPORTED_ARCH: the \"{arch}\" architecture is not supported with a {tool} release"
    )]
    UnsupportedArchitecture { arch: String, tool: String },

    #[error("PLATFORM_UNSUPPORTED_OS: the \"{os}\" platform is not supported with a {tool} release")]
    UnsupportedPlatform { os: String, tool: String },

    // Resolution errors
    #[error(
        "RELEASE_NOT_FOUND: unable to find {tool} version \"{version}\" for platform \"{platform}\" and architecture \"{arch}\""
    )]
    ReleaseNotFound {
        tool: String,
        version: String,
        platform: String,
        arch: String,
    },

    // Transport errors
    #[error("FEED_FETCH_FAILED: {0}")]
    FeedFetchFailed(String),

    #[error("DOWNLOAD_FAILED: {0}")]
    DownloadFailed(String),

    #[error("EXTRACTION_FAILED: {0}")]
    ExtractionFailed(String),

    #[error("CACHE_FAILED: {0}")]
    CacheFailed(String),

    // Verification errors
    #[error("TOOL_NOT_ON_PATH: {0} was not found on PATH")]
    ToolNotOnPath(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl SetupError {
    /// True for failures raised by the download/extract/cache/feed primitives
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SetupError::FeedFetchFailed(_)
                | SetupError::DownloadFailed(_)
                | SetupError::ExtractionFailed(_)
                | SetupError::CacheFailed(_)
                | SetupError::IoError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
