//! Log output for the binary
//!
//! Progress goes to stderr so stdout stays reserved for command output and
//! workflow commands.

use kozmo_setup_core::config::consts::env;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; a second call leaves the first in place
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
