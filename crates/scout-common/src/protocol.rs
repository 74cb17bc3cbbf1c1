use crate::scenario::ElementType;
use serde::{Deserialize, Deserializer, Serialize};

/// Treats `""` the same as a missing value; DOM getters return empty strings
/// for absent ids and class names.
fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// One addressable node of an accessibility snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotElement {
    /// Lower-cased accessibility role.
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Session-scoped handle (`e12`); only meaningful to the backend that produced it.
    #[serde(rename = "ref")]
    pub reference: String,
    pub raw: String,
}

/// Attributes read from the live DOM node behind a snapshot ref.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMetadata {
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub data_test: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectorStrategy {
    TestId,
    Role,
    Placeholder,
    Label,
    Text,
    Css,
}

/// Result of resolving one `ElementSpec` against a snapshot.
///
/// `selector` and `strategy` are either both set or both `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorMatch {
    pub element_name: String,
    pub selector: Option<String>,
    pub strategy: Option<SelectorStrategy>,
    pub confidence: f64,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ElementMetadata>,
    pub reason: String,
}

impl SelectorMatch {
    pub fn unresolved(element_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            selector: None,
            strategy: None,
            confidence: 0.0,
            reference: None,
            snapshot: None,
            metadata: None,
            reason: reason.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.selector.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillResult {
    pub page_name: String,
    pub path: String,
    pub selectors: Vec<SelectorMatch>,
    pub success: bool,
    pub missing_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowExecutionResult {
    pub pages: Vec<PageFillResult>,
    pub has_failures: bool,
}

impl FlowExecutionResult {
    pub fn from_pages(pages: Vec<PageFillResult>) -> Self {
        let has_failures = pages.iter().any(|p| !p.success);
        Self { pages, has_failures }
    }

    pub fn page(&self, name: &str) -> Option<&PageFillResult> {
        self.pages.iter().find(|p| p.page_name == name)
    }
}

/// Tool advertised by an MCP server in `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_schema: serde_json::Value,
}

/// Result payload of an MCP `tools/call`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    #[serde(default)]
    pub content: Vec<ToolContent>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|c| match c {
            ToolContent::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    #[serde(other)]
    Other,
}

/// Default tag for the tag-based selector fallback.
pub fn default_tag(element_type: ElementType) -> Option<&'static str> {
    element_type.default_tags().first().copied()
}
