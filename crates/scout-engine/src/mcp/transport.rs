use async_trait::async_trait;
use scout_common::error::BackendError;
use scout_common::protocol::{ToolInfo, ToolResult};

/// A connection to an MCP server that can list and call tools.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Open the session and return the advertised tools.
    async fn connect(&mut self) -> Result<Vec<ToolInfo>, BackendError>;

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<ToolResult, BackendError>;

    async fn disconnect(&mut self) -> Result<(), BackendError>;
}
