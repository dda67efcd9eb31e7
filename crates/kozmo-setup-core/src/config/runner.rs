//! CI runner environment
//!
//! Collects the directories and endpoints the runner exposes through
//! environment variables, with fallbacks for running outside of CI.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::consts::{defaults, env};
use crate::error::{Result, SetupError};

#[derive(Debug, Clone)]
pub struct RunnerEnv {
    /// Root of the tool cache store
    pub tool_cache: PathBuf,
    /// Scratch root for downloads and extraction
    pub temp_dir: PathBuf,
    /// File collecting PATH additions for later job steps
    pub github_path: Option<PathBuf>,
    /// GitHub REST API base URL
    pub api_url: String,
    /// Search path at process start
    pub search_path: OsString,
}

impl RunnerEnv {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds the environment from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let tool_cache = match non_empty(env::TOOL_CACHE) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::cache_dir()
                .ok_or_else(|| SetupError::ConfigInvalidValue {
                    field: env::TOOL_CACHE.to_string(),
                    reason: "not set and no user cache directory is available".to_string(),
                })?
                .join(defaults::CACHE_SUBDIR)
                .join("tools"),
        };

        let temp_dir = non_empty(env::RUNNER_TEMP)
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        let api_url = non_empty(env::GITHUB_API_URL)
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_else(|| defaults::GITHUB_API_URL.to_string());

        Ok(Self {
            tool_cache,
            temp_dir,
            github_path: non_empty(env::GITHUB_PATH).map(PathBuf::from),
            api_url,
            search_path: lookup(env::PATH).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_runner_variables_are_used() {
        let env = RunnerEnv::from_lookup(lookup_from(&[
            ("RUNNER_TOOL_CACHE", "/opt/hostedtoolcache"),
            ("RUNNER_TEMP", "/home/runner/work/_temp"),
            ("GITHUB_PATH", "/home/runner/work/_temp/_runner_file_commands/add_path"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3"),
            ("PATH", "/usr/bin:/bin"),
        ]))
        .unwrap();

        assert_eq!(env.tool_cache, PathBuf::from("/opt/hostedtoolcache"));
        assert_eq!(env.temp_dir, PathBuf::from("/home/runner/work/_temp"));
        assert!(env.github_path.is_some());
        assert_eq!(env.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(env.search_path, OsString::from("/usr/bin:/bin"));
    }

    #[test]
    fn test_fallbacks_outside_ci() {
        let result = RunnerEnv::from_lookup(lookup_from(&[]));
        let Some(cache_base) = dirs::cache_dir() else {
            assert!(matches!(result, Err(SetupError::ConfigInvalidValue { .. })));
            return;
        };
        let env = result.unwrap();

        assert_eq!(env.tool_cache, cache_base.join("kozmo-setup").join("tools"));
        assert_eq!(env.temp_dir, std::env::temp_dir());
        assert!(env.github_path.is_none());
        assert_eq!(env.api_url, "https://api.github.com");
        assert!(env.search_path.is_empty());
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let env = RunnerEnv::from_lookup(lookup_from(&[
            ("GITHUB_PATH", ""),
            ("GITHUB_API_URL", ""),
            ("RUNNER_TOOL_CACHE", "/cache"),
        ]))
        .unwrap();

        assert!(env.github_path.is_none());
        assert_eq!(env.api_url, "https://api.github.com");
    }
}
