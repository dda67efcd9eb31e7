//! Constants shared across the setup flow

/// Version tokens accepted by the `version` input
pub mod version {
    /// Prefix used in release tags, optionally given in the version input
    pub const PREFIX: &str = "v";

    /// Requests the newest release in the feed
    pub const LATEST: &str = "latest";
}

/// Release asset naming
pub mod asset {
    /// Every release asset is a gzipped tarball
    pub const EXTENSION: &str = ".tar.gz";
}

/// Environment variables read from the CI runner
pub mod env {
    pub const INPUT_VERSION: &str = "INPUT_VERSION";
    pub const INPUT_TOOL: &str = "INPUT_TOOL";
    pub const CONFIG_FILE: &str = "KOZMO_SETUP_CONFIG";
    pub const TOOL_CACHE: &str = "RUNNER_TOOL_CACHE";
    pub const RUNNER_TEMP: &str = "RUNNER_TEMP";
    pub const GITHUB_PATH: &str = "GITHUB_PATH";
    pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
    pub const PATH: &str = "PATH";
    /// `tracing` filter directives for the binary's log output
    pub const LOG: &str = "KOZMO_SETUP_LOG";
}

/// Defaults used when the runner does not provide a value
pub mod defaults {
    /// Tool installed when no `tool` input is given
    pub const TOOL: &str = "kozmoctl";

    pub const GITHUB_API_URL: &str = "https://api.github.com";

    /// Directory under the user cache dir used outside of a CI runner
    pub const CACHE_SUBDIR: &str = "kozmo-setup";
}
