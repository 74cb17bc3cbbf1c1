use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_pages_directory")]
    pub pages_directory: String,
    #[serde(default)]
    pub mcp: McpConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pages_directory: default_pages_directory(),
            mcp: McpConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".into()
}

fn default_pages_directory() -> String {
    "tests/pages".into()
}

/// How to start the MCP server and which of its tools to call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpConfig {
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Extra variables for the server process, on top of the inherited environment.
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default)]
    pub tools: ToolNames,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            env: HashMap::new(),
            tools: ToolNames::default(),
        }
    }
}

fn default_command() -> String {
    "npx".into()
}

fn default_args() -> Vec<String> {
    vec!["@playwright/mcp@latest".into()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolNames {
    #[serde(default = "default_navigate_tool")]
    pub navigate: String,
    #[serde(default = "default_snapshot_tool")]
    pub snapshot: String,
    #[serde(default = "default_evaluate_tool")]
    pub evaluate: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            navigate: default_navigate_tool(),
            snapshot: default_snapshot_tool(),
            evaluate: default_evaluate_tool(),
        }
    }
}

fn default_navigate_tool() -> String {
    "browser_navigate".into()
}

fn default_snapshot_tool() -> String {
    "browser_snapshot".into()
}

fn default_evaluate_tool() -> String {
    "browser_evaluate".into()
}
