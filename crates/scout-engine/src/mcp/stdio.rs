//! MCP client over a child process's stdio, built on the `rmcp` client.
//!
//! The server's stderr is forwarded line by line to `debug!`.

use super::transport::ToolTransport;
use crate::config::McpConfig;
use async_trait::async_trait;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ClientCapabilities, ClientInfo, Implementation, Tool,
};
use rmcp::service::RunningService;
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::{RoleClient, ServiceExt};
use scout_common::error::BackendError;
use scout_common::protocol::{ToolInfo, ToolResult};
use serde_json::Value;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, Command};
use tracing::{debug, info};

const CLIENT_NAME: &str = "scout";

pub struct StdioTransport {
    command: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    service: Option<RunningService<RoleClient, ClientInfo>>,
}

impl StdioTransport {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: HashMap::new(),
            service: None,
        }
    }

    pub fn from_config(config: &McpConfig) -> Self {
        let mut transport = Self::new(config.command.clone(), config.args.clone());
        transport.env = config.env.clone();
        transport
    }

    fn client_info() -> ClientInfo {
        ClientInfo {
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: CLIENT_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

#[async_trait]
impl ToolTransport for StdioTransport {
    async fn connect(&mut self) -> Result<Vec<ToolInfo>, BackendError> {
        if self.service.is_some() {
            return Err(BackendError::Protocol("already connected".into()));
        }

        info!(command = %self.command, args = ?self.args, "Starting MCP server");
        let command = Command::new(&self.command).configure(|cmd| {
            cmd.args(&self.args).envs(&self.env);
        });
        let (process, stderr) = TokioChildProcess::builder(command)
            .stderr(Stdio::piped())
            .spawn()?;
        if let Some(stderr) = stderr {
            tokio::spawn(forward_stderr(stderr));
        }

        let service = Self::client_info()
            .serve(process)
            .await
            .map_err(|e| BackendError::Transport(format!("MCP initialize failed: {}", e)))?;
        if let Some(server) = service.peer_info() {
            debug!(
                name = %server.server_info.name,
                version = %server.server_info.version,
                "MCP initialized"
            );
        }

        let tools = service
            .list_all_tools()
            .await
            .map_err(|e| BackendError::tool("tools/list", e.to_string()))?;
        self.service = Some(service);

        info!(tools = tools.len(), "MCP server connected");
        Ok(tools.iter().map(tool_info).collect())
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<ToolResult, BackendError> {
        let service = self.service.as_ref().ok_or(BackendError::NotReady)?;
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(BackendError::Protocol(format!(
                    "tool arguments must be an object, got {}",
                    other
                )));
            }
        };

        let result = service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments,
            })
            .await
            .map_err(|e| BackendError::tool(name, e.to_string()))?;
        tool_result(&result)
    }

    async fn disconnect(&mut self) -> Result<(), BackendError> {
        let Some(service) = self.service.take() else {
            return Ok(());
        };
        let reason = service
            .cancel()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        debug!(?reason, "MCP server stopped");
        Ok(())
    }
}

async fn forward_stderr(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!(target: "scout::mcp::server", "{}", line);
    }
}

pub(crate) fn tool_info(tool: &Tool) -> ToolInfo {
    ToolInfo {
        name: tool.name.to_string(),
        description: tool.description.as_deref().unwrap_or_default().to_string(),
        input_schema: Value::Object((*tool.input_schema).clone()),
    }
}

/// Re-reads the wire form of a tool result into the crate's own content types.
pub(crate) fn tool_result(result: &CallToolResult) -> Result<ToolResult, BackendError> {
    Ok(serde_json::from_value(serde_json::to_value(result)?)?)
}
