//! CLI command implementations

pub mod install;
pub mod resolve;
pub mod tools;

use kozmo_setup_core::{Result, SetupConfig, SetupError, ToolConfig};
use std::path::Path;

/// Loads the optional tool definitions file
fn load_config(path: Option<&Path>) -> Result<SetupConfig> {
    match path {
        Some(path) => SetupConfig::from_file(path),
        None => Ok(SetupConfig::default()),
    }
}

/// Looks up the requested tool in the config file and the presets
fn select_tool(name: &str, config: Option<&Path>) -> Result<ToolConfig> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SetupError::MissingInput("tool".to_string()));
    }
    load_config(config)?.tool(name)
}
