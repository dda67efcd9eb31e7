//! Install orchestration
//!
//! ```text
//! CACHE_CHECK ─ hit ──────────────────────────────────────────┐
//!      │ miss                                                 ▼
//!   RESOLVE → DOWNLOAD → EXTRACT → CACHE_STORE ──────→ PATH_REGISTER → VERIFY
//! ```
//!
//! Every step returns a `Result`; the first error ends the run. Nothing is
//! retried.

use kozmo_setup_core::{Result, RunnerEnv, SetupError, ToolConfig};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cache::{DirToolCache, ToolCache};
use crate::github::{GitHubReleases, ReleaseSource};
use crate::install::download::{ArchiveFetcher, HttpArchiveFetcher};
use crate::install::platform::HostPlatform;
use crate::path::{PathRegistry, RunnerPath};
use crate::resolve::{Resolver, VersionSpec};

/// States of one install run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    CacheCheck,
    Resolve,
    Download,
    Extract,
    CacheStore,
    PathRegister,
    Verify,
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStep::CacheCheck => "cache-check",
            InstallStep::Resolve => "resolve",
            InstallStep::Download => "download",
            InstallStep::Extract => "extract",
            InstallStep::CacheStore => "cache-store",
            InstallStep::PathRegister => "path-register",
            InstallStep::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// Where the tool directory came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Already present in the tool cache
    Cached(PathBuf),
    /// Downloaded, extracted and stored in this run
    Installed(PathBuf),
}

impl InstallOutcome {
    pub fn dir(&self) -> &Path {
        match self {
            InstallOutcome::Cached(dir) | InstallOutcome::Installed(dir) => dir,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, InstallOutcome::Cached(_))
    }
}

/// Result of a successful [`Installer::setup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub tool: String,
    /// Version as requested, after trimming
    pub version: String,
    pub install_dir: PathBuf,
    /// Binary found on PATH after registration
    pub binary_path: PathBuf,
    pub cached: bool,
}

/// Installs one tool with pluggable feed, cache, fetcher and PATH collaborators
pub struct Installer<S, C, F, P> {
    resolver: Resolver<S>,
    cache: C,
    fetcher: F,
    path: P,
    host: HostPlatform,
}

impl Installer<GitHubReleases, DirToolCache, HttpArchiveFetcher, RunnerPath> {
    /// Installer wired to GitHub, the runner tool cache and `GITHUB_PATH`
    ///
    /// # Errors
    ///
    /// Returns an error if `GITHUB_API_URL` is invalid or an HTTP client
    /// cannot be built
    pub fn for_runner(tool: ToolConfig, env: &RunnerEnv) -> Result<Self> {
        let source = GitHubReleases::with_api_url(&env.api_url)?;
        Ok(Self::new(
            Resolver::new(tool, source),
            DirToolCache::new(&env.tool_cache),
            HttpArchiveFetcher::with_temp_root(&env.temp_dir)?,
            RunnerPath::from_runner(env),
            HostPlatform::current(),
        ))
    }
}

impl<S, C, F, P> Installer<S, C, F, P>
where
    S: ReleaseSource,
    C: ToolCache,
    F: ArchiveFetcher,
    P: PathRegistry,
{
    pub fn new(resolver: Resolver<S>, cache: C, fetcher: F, path: P, host: HostPlatform) -> Self {
        Self {
            resolver,
            cache,
            fetcher,
            path,
            host,
        }
    }

    pub fn tool(&self) -> &ToolConfig {
        self.resolver.tool()
    }

    pub fn host(&self) -> &HostPlatform {
        &self.host
    }

    /// Returns the tool directory for `version`, installing it on a cache miss
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error
    pub fn get_tool(&mut self, version: &VersionSpec) -> Result<InstallOutcome> {
        let tool = self.resolver.tool().tool_name.clone();
        let arch = self.host.arch.clone();

        debug!(step = %InstallStep::CacheCheck, %tool, %version, %arch);
        if let Some(dir) = self.cache.find(&tool, version.as_str(), &arch)? {
            info!("Found in cache @ {}", dir.display());
            return Ok(InstallOutcome::Cached(dir));
        }

        debug!(step = %InstallStep::Resolve);
        info!("Resolving the download URL for the current platform...");
        let url = self.resolver.resolve_download_location(version, &self.host)?;

        debug!(step = %InstallStep::Download);
        info!("Downloading {} version \"{}\" from {}", tool, version, url);
        let archive = self.fetcher.download(&url)?;
        info!("Successfully downloaded {} version \"{}\" from {}", tool, version, url);

        debug!(step = %InstallStep::Extract);
        info!("Extracting {}...", tool);
        let extracted = self.fetcher.extract(&archive)?;
        info!("Successfully extracted {} to {}", tool, extracted.display());

        debug!(step = %InstallStep::CacheStore);
        info!("Adding {} to the cache...", tool);
        let cached = self.cache.store(&extracted, &tool, version.as_str(), &arch)?;
        info!("Successfully cached {} to {}", tool, cached.display());

        Ok(InstallOutcome::Installed(cached))
    }

    /// Installs the tool for a raw version input and puts it on PATH
    ///
    /// An empty (or blank) version fails before any collaborator is called.
    ///
    /// # Errors
    ///
    /// - `MissingInput` for an empty version
    /// - any error of [`Installer::get_tool`]
    /// - `ToolNotOnPath` if the binary is not found after registration
    pub fn setup(&mut self, raw_version: &str) -> Result<SetupReport> {
        let version = VersionSpec::parse(raw_version)?;
        let tool = self.resolver.tool().tool_name.clone();

        info!("Setting up {} version \"{}\"", tool, version);
        let outcome = self.get_tool(&version)?;

        debug!(step = %InstallStep::PathRegister);
        info!("Adding {} binary to PATH", tool);
        self.path.add_to_path(outcome.dir())?;

        debug!(step = %InstallStep::Verify);
        let binary_path = self
            .path
            .which(&tool)?
            .ok_or_else(|| SetupError::ToolNotOnPath(tool.clone()))?;

        info!("Successfully set up {} version {}", tool, version);
        Ok(SetupReport {
            tool,
            version: version.to_string(),
            install_dir: outcome.dir().to_path_buf(),
            binary_path,
            cached: outcome.is_cached(),
        })
    }
}
