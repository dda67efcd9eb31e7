//! Install command - make a tool available on the runner's PATH

use anyhow::Result;
use kozmo_setup_core::RunnerEnv;
use kozmo_setup_release::{Installer, VersionSpec};

use super::select_tool;
use crate::cli::ToolArgs;
use crate::output::print_text;

/// Execute `kozmo-setup install` command
pub fn execute_install(args: ToolArgs) -> Result<()> {
    // Reject a missing version before anything else runs
    VersionSpec::parse(&args.version)?;

    let tool = select_tool(&args.tool, args.config.as_deref())?;
    let env = RunnerEnv::from_env()?;

    let mut installer = Installer::for_runner(tool, &env)?;
    let report = installer.setup(&args.version)?;

    print_text(&format!(
        "Successfully set up {} version {}",
        report.tool, report.version
    ))?;
    Ok(())
}
