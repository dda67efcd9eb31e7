//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use kozmo_setup_core::config::consts;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kozmo-setup")]
#[command(version, about = "Install kozmo CLI tools from GitHub Releases on a CI runner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Raise the default log level to debug
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a tool, cache it and add it to PATH
    Install(ToolArgs),

    /// Print the download URL for a tool version without installing it
    Resolve {
        #[command(flatten)]
        tool: ToolArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known tools
    Tools {
        /// Extra tool definitions (TOML)
        #[arg(long, env = consts::env::CONFIG_FILE)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Inputs shared by `install` and `resolve`
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// Version to install: "latest" or a release tag (e.g. "v1.2.3" or "1.2.3")
    #[arg(long, env = consts::env::INPUT_VERSION, default_value = "")]
    pub version: String,

    /// Tool to install
    #[arg(long, env = consts::env::INPUT_TOOL, default_value = consts::defaults::TOOL)]
    pub tool: String,

    /// Extra tool definitions (TOML)
    #[arg(long, env = consts::env::CONFIG_FILE)]
    pub config: Option<PathBuf>,
}
