//! Test utilities for kozmo-setup
//!
//! This crate provides shared testing utilities used across the kozmo-setup workspace.

pub mod env;
pub mod fixtures;
pub mod mock;

pub use env::{ENV_LOCK, RunnerSandbox, with_isolated_runner_env};
pub use fixtures::{FeedAsset, FeedRelease, fake_tool_script, release_feed_json, tar_gz_with_binary};
pub use mock::{get_shared_mock_server, mock_release_feed};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the crate root
///
/// This keeps test scratch files in a single gitignored location that is easy
/// to clean up manually if a test aborts.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use kozmo_setup_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
