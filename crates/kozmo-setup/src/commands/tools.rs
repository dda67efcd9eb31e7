//! Tools command - list installable tools

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use super::load_config;
use crate::output::{print_json, print_text};

#[derive(Debug, Serialize)]
struct ToolInfo {
    name: String,
    owner: String,
    repo: String,
}

/// Execute `kozmo-setup tools` command
pub fn execute_tools(config: Option<PathBuf>, json: bool) -> Result<()> {
    let tools: Vec<ToolInfo> = load_config(config.as_deref())?
        .tools()
        .into_iter()
        .map(|tool| ToolInfo {
            name: tool.tool_name,
            owner: tool.repo_owner,
            repo: tool.repo_name,
        })
        .collect();

    if json {
        print_json(&serde_json::to_string_pretty(&tools)?)?;
        return Ok(());
    }

    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for tool in &tools {
        print_text(&format!(
            "{:<width$}  {}/{}",
            tool.name,
            tool.owner,
            tool.repo,
            width = width
        ))?;
    }

    Ok(())
}
