use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::consts;
use crate::error::{Result, SetupError};

/// Identifies a tool published through GitHub Releases
///
/// All tools share one resolution algorithm and differ only in these
/// three values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Binary name, also the asset file name stem
    pub tool_name: String,
    /// GitHub owner of the release repository
    pub repo_owner: String,
    /// GitHub repository carrying the releases
    pub repo_name: String,
}

impl ToolConfig {
    pub fn new(
        tool_name: impl Into<String>,
        repo_owner: impl Into<String>,
        repo_name: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            repo_owner: repo_owner.into(),
            repo_name: repo_name.into(),
        }
    }

    pub fn kozmoctl() -> Self {
        Self::new("kozmoctl", "kozmoai", "kozmoctl")
    }

    pub fn nebulactl() -> Self {
        Self::new("nebulactl", "kozmoai", "nebulactl")
    }

    /// Built-in tools, in listing order
    pub fn presets() -> Vec<Self> {
        vec![Self::kozmoctl(), Self::nebulactl()]
    }

    pub fn preset(name: &str) -> Option<Self> {
        Self::presets().into_iter().find(|t| t.tool_name == name)
    }

    /// Expected release asset file name: `{tool}_{platform}_{arch}.tar.gz`
    pub fn asset_name(&self, platform_token: &str, arch_token: &str) -> String {
        format!(
            "{}_{}_{}{}",
            self.tool_name,
            platform_token,
            arch_token,
            consts::asset::EXTENSION
        )
    }
}

/// kozmo-setup.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
}

/// A `[[tools]]` table adding or overriding a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub owner: String,
    pub repo: String,
}

impl From<&ToolEntry> for ToolConfig {
    fn from(entry: &ToolEntry) -> Self {
        ToolConfig::new(&entry.name, &entry.owner, &entry.repo)
    }
}

impl SetupConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SetupError::ConfigParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| SetupError::ConfigParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (index, entry) in self.tools.iter().enumerate() {
            for (field, value) in [
                ("name", &entry.name),
                ("owner", &entry.owner),
                ("repo", &entry.repo),
            ] {
                if value.trim().is_empty() {
                    return Err(SetupError::ConfigInvalidValue {
                        field: format!("tools.{}", field),
                        reason: "must not be empty".to_string(),
                    });
                }
            }

            if self.tools[..index].iter().any(|earlier| earlier.name == entry.name) {
                return Err(SetupError::ConfigInvalidValue {
                    field: "tools.name".to_string(),
                    reason: format!("tool '{}' is defined more than once", entry.name),
                });
            }
        }
        Ok(())
    }

    /// Config entries first, then presets not overridden by them
    pub fn tools(&self) -> Vec<ToolConfig> {
        let mut tools: Vec<ToolConfig> = self.tools.iter().map(ToolConfig::from).collect();
        for preset in ToolConfig::presets() {
            if !tools.iter().any(|t| t.tool_name == preset.tool_name) {
                tools.push(preset);
            }
        }
        tools
    }

    /// Looks up a tool by name; config entries win over presets
    pub fn tool(&self, name: &str) -> Result<ToolConfig> {
        self.tools
            .iter()
            .find(|entry| entry.name == name)
            .map(ToolConfig::from)
            .or_else(|| ToolConfig::preset(name))
            .ok_or_else(|| SetupError::ConfigInvalidValue {
                field: "tool".to_string(),
                reason: format!("unknown tool '{}'", name),
            })
    }
}
