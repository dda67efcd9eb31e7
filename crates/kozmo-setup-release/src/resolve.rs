//! Version-to-asset resolution
//!
//! A [`Resolver`] turns a requested version and the host platform into the
//! download URL of the matching release asset. It reads the release feed
//! at most once per call and never falls back to another release: the
//! release picked by [`find_release`] either carries the expected asset or
//! resolution fails.

use kozmo_setup_core::config::consts;
use kozmo_setup_core::{Result, SetupError, ToolConfig};
use std::fmt;
use tracing::debug;
use url::Url;

use crate::github::ReleaseSource;
use crate::install::platform::{Arch, HostPlatform, Os};
use crate::install::select::{find_release, select_asset};

/// Requested version: the newest release or one specific tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    Latest,
    /// Version identifier as given, prefix included (`v1.2.3` or `1.2.3`)
    Exact(String),
}

impl VersionSpec {
    /// Parses a raw version input
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::MissingInput` if the input is empty
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SetupError::MissingInput("version".to_string()));
        }

        if trimmed == consts::version::LATEST {
            Ok(VersionSpec::Latest)
        } else {
            Ok(VersionSpec::Exact(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VersionSpec::Latest => consts::version::LATEST,
            VersionSpec::Exact(version) => version,
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, VersionSpec::Latest)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves download locations for one tool
///
/// The same algorithm serves every tool; only the [`ToolConfig`] differs.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    tool: ToolConfig,
    source: S,
    version_prefix: &'static str,
}

impl<S: ReleaseSource> Resolver<S> {
    pub fn new(tool: ToolConfig, source: S) -> Self {
        Self {
            tool,
            source,
            version_prefix: consts::version::PREFIX,
        }
    }

    /// Overrides the tag prefix token stripped before comparing versions
    pub fn with_version_prefix(mut self, prefix: &'static str) -> Self {
        self.version_prefix = prefix;
        self
    }

    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Finds the download URL of the asset for `version` on `host`
    ///
    /// Unsupported hosts are rejected before the feed is read.
    ///
    /// # Errors
    ///
    /// - `UnsupportedArchitecture` / `UnsupportedPlatform` for hosts without assets
    /// - `ReleaseNotFound` if no release matches or the matched release lacks the asset
    /// - `FeedFetchFailed` if the release feed cannot be read
    pub fn resolve_download_location(&self, version: &VersionSpec, host: &HostPlatform) -> Result<Url> {
        let arch = Arch::from_host(&host.arch).ok_or_else(|| SetupError::UnsupportedArchitecture {
            arch: host.arch.clone(),
            tool: self.tool.tool_name.clone(),
        })?;
        let os = Os::from_host(&host.os).ok_or_else(|| SetupError::UnsupportedPlatform {
            os: host.os.clone(),
            tool: self.tool.tool_name.clone(),
        })?;

        let asset_name = self.tool.asset_name(os.token(), arch.token());
        debug!(tool = %self.tool.tool_name, %asset_name, %version, "Resolving release asset");

        let releases = self
            .source
            .list_releases(&self.tool.repo_owner, &self.tool.repo_name)?;

        let asset = find_release(&releases, version, self.version_prefix).and_then(|release| {
            debug!(tag = %release.tag_name, assets = release.assets.len(), "Matched release");
            select_asset(release, &asset_name)
        });

        match asset {
            Some(asset) => {
                debug!(url = %asset.browser_download_url, size = asset.size, "Matched asset");
                Url::parse(&asset.browser_download_url).map_err(|e| {
                    SetupError::FeedFetchFailed(format!(
                        "asset {} has an invalid download URL '{}': {}",
                        asset.name, asset.browser_download_url, e
                    ))
                })
            }
            None => Err(SetupError::ReleaseNotFound {
                tool: self.tool.tool_name.clone(),
                version: version.to_string(),
                platform: os.token().to_string(),
                arch: arch.token().to_string(),
            }),
        }
    }
}
