//! Environment isolation utilities for testing
//!
//! This module provides a throwaway runner layout (tool cache, scratch
//! directory, `GITHUB_PATH` file) and a lock for tests that have to point
//! the process environment at it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runner variables overridden by [`with_isolated_runner_env`]
const RUNNER_VARS: [&str; 4] = [
    "RUNNER_TOOL_CACHE",
    "RUNNER_TEMP",
    "GITHUB_PATH",
    "GITHUB_API_URL",
];

/// Directory layout mimicking a hosted CI runner
pub struct RunnerSandbox {
    root: TempDir,
    tool_cache: PathBuf,
    temp: PathBuf,
    github_path: PathBuf,
}

impl RunnerSandbox {
    /// Creates the sandbox under the crate's `.tmp/` directory
    ///
    /// # Panics
    ///
    /// Panics if any of the sandbox directories cannot be created.
    pub fn new() -> Self {
        let root = crate::temp_dir_in_workspace();
        let tool_cache = root.path().join("hostedtoolcache");
        let temp = root.path().join("_temp");
        let github_path = temp.join("_runner_file_commands").join("add_path");

        std::fs::create_dir_all(&tool_cache).expect("Failed to create tool cache");
        std::fs::create_dir_all(github_path.parent().unwrap())
            .expect("Failed to create runner file commands dir");
        std::fs::write(&github_path, "").expect("Failed to create GITHUB_PATH file");

        Self {
            root,
            tool_cache,
            temp,
            github_path,
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn tool_cache(&self) -> &Path {
        &self.tool_cache
    }

    pub fn temp(&self) -> &Path {
        &self.temp
    }

    pub fn github_path(&self) -> &Path {
        &self.github_path
    }

    /// Lines appended to the `GITHUB_PATH` file so far
    pub fn github_path_entries(&self) -> Vec<String> {
        std::fs::read_to_string(&self.github_path)
            .unwrap_or_default()
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Variables to hand to a child process (e.g. via `Command::envs`)
    pub fn env_vars(&self, api_url: &str) -> Vec<(&'static str, OsString)> {
        vec![
            ("RUNNER_TOOL_CACHE", self.tool_cache.clone().into_os_string()),
            ("RUNNER_TEMP", self.temp.clone().into_os_string()),
            ("GITHUB_PATH", self.github_path.clone().into_os_string()),
            ("GITHUB_API_URL", OsString::from(api_url)),
        ]
    }
}

impl Default for RunnerSandbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a test with the process environment pointed at a fresh [`RunnerSandbox`]
///
/// Holds [`ENV_LOCK`] for the duration of the closure and restores the
/// original runner variables afterwards.
///
/// # Examples
///
/// ```no_run
/// use kozmo_setup_testkit::with_isolated_runner_env;
///
/// with_isolated_runner_env("http://127.0.0.1:1234", |sandbox| {
///     assert!(sandbox.tool_cache().exists());
///     assert_eq!(
///         std::env::var("GITHUB_API_URL").unwrap(),
///         "http://127.0.0.1:1234"
///     );
/// });
/// ```
pub fn with_isolated_runner_env<F, R>(api_url: &str, f: F) -> R
where
    F: FnOnce(&RunnerSandbox) -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| {
        // Environment variables remain valid after a panic; the lock only serializes access
        poisoned.into_inner()
    });

    let original: Vec<(&str, Option<OsString>)> = RUNNER_VARS
        .iter()
        .map(|key| (*key, std::env::var_os(key)))
        .collect();

    let sandbox = RunnerSandbox::new();

    // SAFETY: We hold ENV_LOCK, ensuring no other test is modifying env vars concurrently.
    unsafe {
        for (key, value) in sandbox.env_vars(api_url) {
            std::env::set_var(key, value);
        }
    }

    let result = f(&sandbox);

    // SAFETY: We still hold ENV_LOCK, ensuring exclusive access to env vars.
    unsafe {
        for (key, value) in original {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    result
}
