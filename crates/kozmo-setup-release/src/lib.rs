//! Release resolution and installation for kozmo-setup.
//!
//! This crate installs tools published as GitHub Release assets into a
//! CI runner's tool cache and registers them on PATH.
//!
//! # Architecture
//!
//! - [`github`]: HTTP client, URL helpers, streaming downloads, release feed
//! - [`install`]: host platform mapping, release model, selection, archive fetch/extract
//! - [`resolve`]: version-to-asset resolution
//! - [`cache`]: tool cache keyed by (tool, version, architecture)
//! - [`path`]: PATH registration and lookup
//! - [`installer`]: orchestration of the above
//!
//! # Install Flow
//!
//! ```text
//! Installer::setup(version)
//!     ↓
//! 1. Parse version (empty → CONFIG_MISSING_INPUT, nothing else runs)
//!     ↓
//! 2. Check tool cache {root}/{tool}/{version}/{arch}
//!     ↓ (miss)
//! 3. Resolve asset URL
//!     → Reject unsupported arch / OS (no feed fetch)
//!     → GET /repos/{owner}/{repo}/releases
//!     → "latest": first release only; otherwise first matching tag only
//!     ↓
//! 4. Download → extract → store in cache
//!     ↓
//! 5. Add directory to PATH (and GITHUB_PATH)
//!     ↓
//! 6. Verify the binary is found on PATH
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kozmo_setup_core::{RunnerEnv, ToolConfig};
//! use kozmo_setup_release::Installer;
//!
//! # fn main() -> kozmo_setup_release::Result<()> {
//! let env = RunnerEnv::from_env()?;
//! let mut installer = Installer::for_runner(ToolConfig::kozmoctl(), &env)?;
//!
//! let report = installer.setup("v1.2.3")?;
//! println!("{} at {}", report.tool, report.binary_path.display());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod github;
pub mod install;
pub mod installer;
pub mod path;
pub mod resolve;

pub use cache::{DirToolCache, ToolCache};
pub use github::{GitHubReleases, ReleaseSource};
pub use install::{ArchiveFetcher, HostPlatform, HttpArchiveFetcher};
pub use installer::{InstallOutcome, InstallStep, Installer, SetupReport};
pub use path::{PathRegistry, RunnerPath};
pub use resolve::{Resolver, VersionSpec};

// Type alias for convenience
pub type Result<T> = kozmo_setup_core::Result<T>;
