//! Resolve command - print the download URL for a tool version

use anyhow::Result;
use kozmo_setup_core::RunnerEnv;
use kozmo_setup_release::{GitHubReleases, HostPlatform, Resolver, VersionSpec};
use serde::Serialize;

use super::select_tool;
use crate::cli::ToolArgs;
use crate::output::{print_json, print_text};

#[derive(Debug, Serialize)]
struct Resolution {
    tool: String,
    version: String,
    url: String,
}

/// Execute `kozmo-setup resolve` command
pub fn execute_resolve(args: ToolArgs, json: bool) -> Result<()> {
    let version = VersionSpec::parse(&args.version)?;
    let tool = select_tool(&args.tool, args.config.as_deref())?;
    let env = RunnerEnv::from_env()?;

    let resolver = Resolver::new(tool, GitHubReleases::with_api_url(&env.api_url)?);
    let url = resolver.resolve_download_location(&version, &HostPlatform::current())?;

    if json {
        let resolution = Resolution {
            tool: resolver.tool().tool_name.clone(),
            version: version.to_string(),
            url: url.to_string(),
        };
        print_json(&serde_json::to_string_pretty(&resolution)?)?;
    } else {
        print_text(url.as_str())?;
    }

    Ok(())
}
