use thiserror::Error;

/// Errors raised at the automation boundary (browser session, MCP transport).
///
/// These are the only errors the selector pipeline propagates; "element not
/// found" style outcomes are encoded in `SelectorMatch` instead.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend not ready")]
    NotReady,

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
