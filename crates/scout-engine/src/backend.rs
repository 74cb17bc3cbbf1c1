use async_trait::async_trait;
pub use scout_common::error::BackendError;

#[derive(Debug, Clone)]
pub struct NavigationResult {
    pub url: String,
    pub title: String,
    pub status: u16,
}

/// The automation session the selector pipeline drives.
///
/// Only three calls matter to the core: `navigate`, `snapshot` and
/// `evaluate_element`. Element refs handed out by `snapshot` are valid only
/// until the next navigation on the same backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Start the session (spawn the MCP server, connect, etc.)
    async fn launch(&mut self) -> Result<(), BackendError>;

    /// Close the session and release its resources.
    async fn close(&mut self) -> Result<(), BackendError>;

    async fn is_ready(&self) -> bool;

    /// Navigate to a path relative to the configured base URL, or to an absolute URL.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError>;

    /// Accessibility snapshot of the current page as text.
    async fn snapshot(&mut self) -> Result<String, BackendError>;

    /// Run `function` against the node behind `reference`.
    ///
    /// `element` is a human-readable description used for permission prompts
    /// and logs. `Ok(None)` means the call succeeded but returned nothing usable.
    async fn evaluate_element(
        &mut self,
        _element: &str,
        _reference: &str,
        _function: &str,
    ) -> Result<Option<serde_json::Value>, BackendError> {
        Err(BackendError::NotSupported("evaluate_element".into()))
    }
}
