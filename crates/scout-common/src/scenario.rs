//! Scenario document model.
//!
//! Produced by the scenario parser and consumed by the selector pipeline.
//! Field names serialise in camelCase so the JSON form matches what the
//! page-object generators downstream expect.

use serde::{Deserialize, Serialize};

/// Parsed form of one scenario markdown file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDocument {
    pub pages: Vec<PageDefinition>,
    pub flows: Vec<TestFlow>,
}

impl ScenarioDocument {
    pub fn page(&self, name: &str) -> Option<&PageDefinition> {
        self.pages.iter().find(|p| p.name == name)
    }

    /// Flows with at least one step whose page is `page_name`.
    pub fn flows_for_page<'a>(&'a self, page_name: &'a str) -> impl Iterator<Item = &'a TestFlow> {
        self.flows.iter().filter(move |flow| {
            flow.steps
                .iter()
                .any(|s| s.page.as_deref() == Some(page_name))
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDefinition {
    pub name: String,
    /// URL path; empty until a `경로` line is seen.
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFlow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default)]
    pub steps: Vec<TestStep>,
}

/// A best-effort classification of one numbered scenario line.
///
/// `raw` is authoritative; every other field is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    /// Number as written in the source, not the position.
    pub order: u32,
    pub raw: String,
    pub action: StepAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion: Option<String>,
}

impl TestStep {
    pub fn new(order: u32, raw: impl Into<String>, action: StepAction) -> Self {
        Self {
            order,
            raw: raw.into(),
            action,
            target: None,
            value: None,
            page: None,
            assertion: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Navigate,
    Input,
    Click,
    VerifyUrl,
    VerifyText,
    VerifyVisible,
    Wait,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Input,
    Button,
    Link,
    Text,
    Select,
    Checkbox,
    Radio,
}

impl ElementType {
    /// Accessibility roles a snapshot node may carry for this element type.
    pub fn roles(self) -> &'static [&'static str] {
        match self {
            ElementType::Input => &["textbox", "combobox", "searchbox"],
            ElementType::Button => &["button"],
            ElementType::Link => &["link"],
            ElementType::Text => &["generic", "text"],
            ElementType::Select => &["combobox"],
            ElementType::Checkbox => &["checkbox"],
            ElementType::Radio => &["radio"],
        }
    }

    /// HTML tags tried, in order, when nothing better than the tag is known.
    pub fn default_tags(self) -> &'static [&'static str] {
        match self {
            ElementType::Input => &["input", "textarea"],
            ElementType::Button => &["button"],
            ElementType::Link => &["a", "button"],
            ElementType::Text => &["p", "span", "div"],
            ElementType::Select => &["select"],
            ElementType::Checkbox | ElementType::Radio => &["input"],
        }
    }
}

/// An element a page object needs a selector for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSpec {
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub used_in_steps: Vec<u32>,
}

impl ElementSpec {
    pub fn new(name: impl Into<String>, purpose: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
            element_type,
            used_in_steps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageObjectSpec {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required_elements: Vec<ElementSpec>,
}

/// Outcome of `validate`; the parser itself never fails on content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}
