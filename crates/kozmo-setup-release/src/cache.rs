//! Tool cache keyed by (tool, version, architecture)
//!
//! # Layout
//!
//! ```text
//! {root}/
//!   kozmoctl/
//!     1.2.3/
//!       x86_64/            ← extracted archive contents
//!       x86_64.complete    ← written last; an entry without it is a miss
//! ```
//!
//! This matches the hosted runner tool cache (`RUNNER_TOOL_CACHE`), so
//! entries written by other setup steps are found too.

use kozmo_setup_core::config::consts;
use kozmo_setup_core::{Result, SetupError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::install::select::strip_version_prefix;

/// Keyed storage of installed tool directories
pub trait ToolCache {
    /// Cached directory of `tool` at `version` for `arch`, if present
    ///
    /// # Errors
    ///
    /// Returns `SetupError::CacheFailed` if the cache cannot be inspected
    fn find(&self, tool: &str, version: &str, arch: &str) -> Result<Option<PathBuf>>;

    /// Copies `src` into the cache and returns the cached directory
    ///
    /// # Errors
    ///
    /// Returns `SetupError::CacheFailed` if the copy cannot be completed
    fn store(&mut self, src: &Path, tool: &str, version: &str, arch: &str) -> Result<PathBuf>;
}

/// [`ToolCache`] backed by a directory tree
#[derive(Debug, Clone)]
pub struct DirToolCache {
    root: PathBuf,
}

impl DirToolCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory an entry lives in, whether or not it exists
    pub fn entry_dir(&self, tool: &str, version: &str, arch: &str) -> PathBuf {
        self.version_dir(tool, version).join(arch)
    }

    fn version_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(cache_version(version))
    }

    fn marker(&self, tool: &str, version: &str, arch: &str) -> PathBuf {
        self.version_dir(tool, version)
            .join(format!("{}.complete", arch))
    }
}

/// Version key used on disk: one leading prefix token removed
fn cache_version(version: &str) -> &str {
    strip_version_prefix(version.trim(), consts::version::PREFIX)
}

impl ToolCache for DirToolCache {
    fn find(&self, tool: &str, version: &str, arch: &str) -> Result<Option<PathBuf>> {
        // "latest" moves; a stored copy may be stale
        if version.trim() == consts::version::LATEST {
            return Ok(None);
        }

        let dir = self.entry_dir(tool, version, arch);
        let marker = self.marker(tool, version, arch);
        debug!(dir = %dir.display(), "Looking up tool cache");

        if dir.is_dir() && marker.is_file() {
            Ok(Some(dir))
        } else {
            Ok(None)
        }
    }

    fn store(&mut self, src: &Path, tool: &str, version: &str, arch: &str) -> Result<PathBuf> {
        let dest = self.entry_dir(tool, version, arch);
        let marker = self.marker(tool, version, arch);

        remove_if_exists(&marker)?;
        if dest.exists() {
            fs::remove_dir_all(&dest).map_err(|e| cache_failed("remove stale entry", &dest, e))?;
        }

        copy_tree(src, &dest)?;
        fs::write(&marker, "").map_err(|e| cache_failed("write marker", &marker, e))?;

        debug!(src = %src.display(), dest = %dest.display(), "Stored tool in cache");
        Ok(dest)
    }
}

fn cache_failed(operation: &str, path: &Path, err: impl std::fmt::Display) -> SetupError {
    SetupError::CacheFailed(format!("failed to {} {}: {}", operation, path.display(), err))
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(cache_failed("remove", path, e)),
    }
}

/// Recursively copies `src` to `dest`, keeping file modes and symlinks
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(SetupError::CacheFailed(format!(
            "source directory {} does not exist",
            src.display()
        )));
    }

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| cache_failed("read", src, e))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| cache_failed("resolve", entry.path(), e))?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| cache_failed("create", &target, e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| cache_failed("copy to", &target, e))?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(src).map_err(|e| cache_failed("read link", src, e))?;
    std::os::unix::fs::symlink(&link, target).map_err(|e| cache_failed("create link", target, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, target: &Path) -> Result<()> {
    fs::copy(src, target)
        .map(|_| ())
        .map_err(|e| cache_failed("copy to", target, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kozmo_setup_testkit::temp_dir_in_workspace;

    fn extracted_dir(parent: &Path, contents: &str) -> PathBuf {
        let dir = parent.join("extracted");
        fs::create_dir_all(dir.join("share")).unwrap();
        fs::write(dir.join("kozmoctl"), contents).unwrap();
        fs::write(dir.join("share").join("README"), "docs").unwrap();
        dir
    }

    #[test]
    fn test_find_on_empty_cache() {
        let temp = temp_dir_in_workspace();
        let cache = DirToolCache::new(temp.path().join("cache"));
        assert_eq!(cache.find("kozmoctl", "1.2.3", "x86_64").unwrap(), None);
    }

    #[test]
    fn test_store_then_find() {
        let temp = temp_dir_in_workspace();
        let src = extracted_dir(temp.path(), "binary");
        let mut cache = DirToolCache::new(temp.path().join("cache"));

        let stored = cache.store(&src, "kozmoctl", "1.2.3", "x86_64").unwrap();

        assert_eq!(
            stored,
            temp.path().join("cache").join("kozmoctl").join("1.2.3").join("x86_64")
        );
        assert_eq!(fs::read_to_string(stored.join("kozmoctl")).unwrap(), "binary");
        assert_eq!(fs::read_to_string(stored.join("share").join("README")).unwrap(), "docs");
        assert_eq!(cache.find("kozmoctl", "1.2.3", "x86_64").unwrap(), Some(stored));
    }

    #[test]
    fn test_version_prefix_is_normalised() {
        let temp = temp_dir_in_workspace();
        let src = extracted_dir(temp.path(), "binary");
        let mut cache = DirToolCache::new(temp.path().join("cache"));

        let stored = cache.store(&src, "kozmoctl", "v1.2.3", "x86_64").unwrap();

        assert_eq!(cache.find("kozmoctl", "1.2.3", "x86_64").unwrap(), Some(stored.clone()));
        assert_eq!(cache.find("kozmoctl", "v1.2.3", "x86_64").unwrap(), Some(stored));
    }

    #[test]
    fn test_key_includes_tool_and_arch() {
        let temp = temp_dir_in_workspace();
        let src = extracted_dir(temp.path(), "binary");
        let mut cache = DirToolCache::new(temp.path().join("cache"));
        cache.store(&src, "kozmoctl", "1.2.3", "x86_64").unwrap();

        assert_eq!(cache.find("nebulactl", "1.2.3", "x86_64").unwrap(), None);
        assert_eq!(cache.find("kozmoctl", "1.2.3", "aarch64").unwrap(), None);
        assert_eq!(cache.find("kozmoctl", "1.2.4", "x86_64").unwrap(), None);
    }

    #[test]
    fn test_latest_is_stored_but_never_found() {
        let temp = temp_dir_in_workspace();
        let src = extracted_dir(temp.path(), "binary");
        let mut cache = DirToolCache::new(temp.path().join("cache"));

        let stored = cache.store(&src, "kozmoctl", "latest", "x86_64").unwrap();

        assert!(stored.join("kozmoctl").is_file());
        assert_eq!(cache.find("kozmoctl", "latest", "x86_64").unwrap(), None);
    }

    #[test]
    fn test_entry_without_marker_is_a_miss() {
        let temp = temp_dir_in_workspace();
        let cache = DirToolCache::new(temp.path().join("cache"));
        let dir = cache.entry_dir("kozmoctl", "1.2.3", "x86_64");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("kozmoctl"), "half-copied").unwrap();

        assert_eq!(cache.find("kozmoctl", "1.2.3", "x86_64").unwrap(), None);
    }

    #[test]
    fn test_store_replaces_previous_entry() {
        let temp = temp_dir_in_workspace();
        let mut cache = DirToolCache::new(temp.path().join("cache"));

        let first = extracted_dir(&temp.path().join("first"), "old");
        let stored = cache.store(&first, "kozmoctl", "1.2.3", "x86_64").unwrap();
        fs::write(stored.join("leftover"), "stale").unwrap();

        let second = extracted_dir(&temp.path().join("second"), "new");
        let stored = cache.store(&second, "kozmoctl", "1.2.3", "x86_64").unwrap();

        assert_eq!(fs::read_to_string(stored.join("kozmoctl")).unwrap(), "new");
        assert!(!stored.join("leftover").exists());
    }

    #[test]
    fn test_store_missing_source() {
        let temp = temp_dir_in_workspace();
        let mut cache = DirToolCache::new(temp.path().join("cache"));

        let err = cache
            .store(&temp.path().join("nope"), "kozmoctl", "1.2.3", "x86_64")
            .unwrap_err();
        assert!(matches!(err, SetupError::CacheFailed(_)));
        assert_eq!(cache.find("kozmoctl", "1.2.3", "x86_64").unwrap(), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_store_keeps_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp = temp_dir_in_workspace();
        let src = extracted_dir(temp.path(), "#!/bin/sh\n");
        fs::set_permissions(src.join("kozmoctl"), fs::Permissions::from_mode(0o755)).unwrap();

        let mut cache = DirToolCache::new(temp.path().join("cache"));
        let stored = cache.store(&src, "kozmoctl", "1.2.3", "x86_64").unwrap();

        let mode = fs::metadata(stored.join("kozmoctl")).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
