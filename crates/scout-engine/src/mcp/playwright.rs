//! `Backend` implementation on top of the Playwright MCP server's tools.

use super::transport::ToolTransport;
use crate::backend::{Backend, BackendError, NavigationResult};
use crate::config::ToolNames;
use async_trait::async_trait;
use scout_common::protocol::{ToolInfo, ToolResult};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

const RESULT_HEADING: &str = "### Result";

pub struct PlaywrightBackend<T: ToolTransport> {
    transport: T,
    base_url: String,
    tools: ToolNames,
    catalogue: Vec<ToolInfo>,
    ready: bool,
}

impl<T: ToolTransport> PlaywrightBackend<T> {
    pub fn new(transport: T, base_url: impl Into<String>, tools: ToolNames) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            tools,
            catalogue: Vec::new(),
            ready: false,
        }
    }

    /// Tools advertised by the server at launch.
    pub fn catalogue(&self) -> &[ToolInfo] {
        &self.catalogue
    }

    /// Absolute `http(s)` URLs pass through; anything else is appended to the base URL.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    async fn call(&mut self, tool: &str, arguments: Value) -> Result<ToolResult, BackendError> {
        debug!(tool, %arguments, "Calling tool");
        self.transport.call_tool(tool, arguments).await
    }
}

#[async_trait]
impl<T: ToolTransport> Backend for PlaywrightBackend<T> {
    async fn launch(&mut self) -> Result<(), BackendError> {
        self.catalogue = self.transport.connect().await?;
        for tool in &self.catalogue {
            debug!(name = %tool.name, description = %tool.description, "Available tool");
        }
        for required in [&self.tools.navigate, &self.tools.snapshot, &self.tools.evaluate] {
            if !self.catalogue.iter().any(|t| &t.name == required) {
                warn!(tool = %required, "Configured tool not advertised by the MCP server");
            }
        }
        self.ready = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BackendError> {
        self.ready = false;
        self.transport.disconnect().await
    }

    async fn is_ready(&self) -> bool {
        self.ready
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        let url = self.resolve_url(url);
        info!(url = %url, "Navigating");

        let tool = self.tools.navigate.clone();
        let result = self.call(&tool, json!({ "url": url })).await?;
        let text = result.first_text().unwrap_or_default();
        if result.is_error {
            return Err(BackendError::Navigation(format!("{}: {}", url, text)));
        }

        Ok(NavigationResult {
            title: page_title(text).unwrap_or_default().to_string(),
            url,
            status: 200,
        })
    }

    async fn snapshot(&mut self) -> Result<String, BackendError> {
        let tool = self.tools.snapshot.clone();
        let result = self.call(&tool, json!({})).await?;
        let text = result.first_text().unwrap_or_default().to_string();
        if result.is_error {
            return Err(BackendError::tool(tool, text));
        }
        Ok(text)
    }

    async fn evaluate_element(
        &mut self,
        element: &str,
        reference: &str,
        function: &str,
    ) -> Result<Option<Value>, BackendError> {
        let tool = self.tools.evaluate.clone();
        let result = self
            .call(
                &tool,
                json!({ "element": element, "ref": reference, "function": function }),
            )
            .await?;
        let text = result.first_text().unwrap_or_default();
        if result.is_error {
            return Err(BackendError::tool(tool, text));
        }
        Ok(parse_evaluate_output(text))
    }
}

/// `- Page Title: Login` line of a navigate or snapshot response.
fn page_title(text: &str) -> Option<&str> {
    text.lines()
        .find_map(|line| line.trim().trim_start_matches("- ").strip_prefix("Page Title:"))
        .map(str::trim)
}

/// Extracts the JSON value an evaluate call produced.
///
/// The server may return bare JSON, or markdown sections where `### Result`
/// holds the value (bare or fenced) followed by other sections such as the
/// generated code. Failing that, the whole text is tried as a fenced block,
/// then as an object literal inside prose. `null` counts as nothing.
pub fn parse_evaluate_output(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let value = result_section(text)
        .and_then(parse_json_text)
        .or_else(|| parse_json_text(text))?;
    (!value.is_null()).then_some(value)
}

fn parse_json_text(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .or_else(|| fenced_block(text).and_then(|block| serde_json::from_str(block).ok()))
        .or_else(|| object_span(text).and_then(|span| serde_json::from_str(span).ok()))
}

/// Body of the `### Result` section, up to the next `### ` heading.
fn result_section(text: &str) -> Option<&str> {
    let start = text.find(RESULT_HEADING)? + RESULT_HEADING.len();
    let body = &text[start..];
    let end = body.find("\n### ").unwrap_or(body.len());
    Some(body[..end].trim())
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    // skip the info string (`json`, `js`)
    let body_start = rest.find('\n')? + 1;
    let body = &rest[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
