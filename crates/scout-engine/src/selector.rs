//! Selector synthesis from an accessibility snapshot.
//!
//! Each `ElementSpec` is matched against the snapshot nodes by token overlap,
//! the best node's DOM attributes are read back through the backend, and the
//! most stable Playwright locator available is produced from them.

use crate::backend::{Backend, BackendError};
use crate::snapshot::parse_snapshot;
use lazy_static::lazy_static;
use regex::Regex;
use scout_common::protocol::{
    ElementMetadata, SelectorMatch, SelectorStrategy, SnapshotElement, default_tag,
};
use scout_common::scenario::{ElementSpec, ElementType};
use tracing::debug;

/// Reads the attributes selector synthesis cares about from the node behind a ref.
pub const METADATA_SCRIPT: &str = r#"element => ({
  tag: element.tagName?.toLowerCase(),
  type: element.getAttribute('type'),
  id: element.id,
  name: element.getAttribute('name'),
  placeholder: element.getAttribute('placeholder'),
  dataTest: element.getAttribute('data-test'),
  text: element.textContent?.trim(),
  label: element.labels?.[0]?.textContent?.trim(),
  ariaLabel: element.getAttribute('aria-label'),
  className: typeof element.className === 'string' ? element.className : '',
  role: element.getAttribute('role')
})"#;

const TOKEN_SCORE: u32 = 3;
const ROLE_BONUS: u32 = 1;

lazy_static! {
    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
    static ref NAME_SEPARATOR: Regex = Regex::new(r"[\s_-]+").unwrap();
    static ref PURPOSE_SEPARATOR: Regex = Regex::new(r"[\s,]+").unwrap();
    static ref CLASS_UNSAFE: Regex = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
}

pub struct SelectorFiller<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: Backend + ?Sized> SelectorFiller<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self { backend }
    }

    /// Navigates to `path`, takes a fresh snapshot and resolves every element against it.
    pub async fn fill_page_selectors(
        &mut self,
        path: &str,
        elements: &[ElementSpec],
    ) -> Result<Vec<SelectorMatch>, BackendError> {
        self.backend.navigate(path).await?;
        let snapshot = self.backend.snapshot().await?;
        self.fill_selectors_from_snapshot(elements, &snapshot).await
    }

    /// Resolves `elements` against an already captured snapshot.
    ///
    /// Returns one match per element, in input order. Elements that cannot be
    /// resolved come back with `selector: None` and a reason; only backend
    /// failures are errors.
    pub async fn fill_selectors_from_snapshot(
        &mut self,
        elements: &[ElementSpec],
        snapshot: &str,
    ) -> Result<Vec<SelectorMatch>, BackendError> {
        let nodes = parse_snapshot(snapshot);
        debug!(nodes = nodes.len(), elements = elements.len(), "Parsed snapshot");

        let mut matches = Vec::with_capacity(elements.len());
        for element in elements {
            matches.push(self.match_element(element, &nodes).await?);
        }
        Ok(matches)
    }

    async fn match_element(
        &mut self,
        element: &ElementSpec,
        nodes: &[SnapshotElement],
    ) -> Result<SelectorMatch, BackendError> {
        let tokens = tokenize(element);
        let candidates = filter_candidates(element.element_type, nodes);
        if candidates.is_empty() {
            return Ok(SelectorMatch::unresolved(
                &element.name,
                "no candidates in snapshot",
            ));
        }

        let mut scored: Vec<(&SnapshotElement, u32)> = candidates
            .into_iter()
            .map(|node| (node, score(node, &tokens)))
            .collect();
        // sort_by is stable, so equal scores keep snapshot order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        let (best, best_score) = scored[0];
        debug!(element = %element.name, reference = %best.reference, score = best_score, "Best candidate");

        if best_score == 0 {
            let mut unresolved = SelectorMatch::unresolved(
                &element.name,
                "no candidate matched the element tokens",
            );
            unresolved.reference = Some(best.reference.clone());
            unresolved.snapshot = Some(best.clone());
            return Ok(unresolved);
        }

        let metadata = self
            .backend
            .evaluate_element(
                &format!("{} candidate", element.name),
                &best.reference,
                METADATA_SCRIPT,
            )
            .await?
            .and_then(|value| serde_json::from_value::<ElementMetadata>(value).ok());

        let (selector, strategy, reason) =
            build_selector(metadata.as_ref(), best, element.element_type);

        Ok(SelectorMatch {
            element_name: element.name.clone(),
            strategy: selector.as_ref().and(strategy),
            selector,
            confidence: (f64::from(best_score) / 10.0).min(1.0),
            reference: Some(best.reference.clone()),
            snapshot: Some(best.clone()),
            metadata,
            reason: reason.to_string(),
        })
    }
}

/// Lower-cased, de-duplicated words from the element name and purpose.
///
/// `emailInput` -> `email`, `input`; the purpose is split on whitespace and commas.
pub fn tokenize(element: &ElementSpec) -> Vec<String> {
    let words = split_words(&element.name)
        .into_iter()
        .chain(PURPOSE_SEPARATOR.split(&element.purpose).map(str::to_string));

    let mut tokens: Vec<String> = Vec::new();
    for word in words {
        let token = word.to_lowercase();
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Splits an identifier at camel-case boundaries, whitespace, `_` and `-`.
///
/// Case is preserved; empty pieces are dropped.
pub fn split_words(name: &str) -> Vec<String> {
    let spaced = CAMEL_BOUNDARY.replace_all(name, "$1 $2");
    NAME_SEPARATOR
        .split(&spaced)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn filter_candidates(element_type: ElementType, nodes: &[SnapshotElement]) -> Vec<&SnapshotElement> {
    let roles = element_type.roles();
    nodes
        .iter()
        .filter(|node| roles.is_empty() || roles.contains(&node.role.as_str()))
        .collect()
}

fn score(node: &SnapshotElement, tokens: &[String]) -> u32 {
    if tokens.is_empty() {
        return 1;
    }

    let name = node.name.as_deref().unwrap_or_default().to_lowercase();
    let mut score = tokens
        .iter()
        .filter(|token| name.contains(token.as_str()))
        .count() as u32
        * TOKEN_SCORE;
    if !node.role.is_empty() {
        score += ROLE_BONUS;
    }
    score
}

/// Picks the first applicable strategy, most stable first.
fn build_selector(
    metadata: Option<&ElementMetadata>,
    node: &SnapshotElement,
    element_type: ElementType,
) -> (Option<String>, Option<SelectorStrategy>, &'static str) {
    let Some(metadata) = metadata else {
        return match &node.name {
            Some(name) => (
                Some(role_selector(&node.role, name)),
                Some(SelectorStrategy::Role),
                "accessible name",
            ),
            None => (None, None, "no metadata"),
        };
    };

    if let Some(test_id) = &metadata.data_test {
        return (
            Some(format!("this.page.getByTestId('{}')", escape_quotes(test_id))),
            Some(SelectorStrategy::TestId),
            "data-test attribute",
        );
    }

    if let Some(placeholder) = &metadata.placeholder {
        return (
            Some(format!(
                "this.page.getByPlaceholder('{}')",
                escape_quotes(placeholder)
            )),
            Some(SelectorStrategy::Placeholder),
            "placeholder",
        );
    }

    if let Some(name) = &metadata.name {
        return (
            Some(format!(
                "this.page.locator('[name=\"{}\"]')",
                escape_attribute(name)
            )),
            Some(SelectorStrategy::Css),
            "name attribute",
        );
    }

    if let Some(id) = &metadata.id {
        return (
            Some(format!("this.page.locator('#{}')", escape_quotes(id))),
            Some(SelectorStrategy::Css),
            "id attribute",
        );
    }

    if let Some(name) = &node.name {
        return (
            Some(role_selector(&node.role, name)),
            Some(SelectorStrategy::Role),
            "accessible name",
        );
    }

    match tag_selector(metadata, element_type) {
        Some(selector) => (Some(selector), Some(SelectorStrategy::Css), "tag fallback"),
        None => (None, None, "no usable attributes"),
    }
}

fn role_selector(role: &str, name: &str) -> String {
    format!(
        "this.page.getByRole('{}', {{ name: '{}' }})",
        escape_quotes(role),
        escape_quotes(name)
    )
}

fn tag_selector(metadata: &ElementMetadata, element_type: ElementType) -> Option<String> {
    let tag = metadata.tag.as_deref().or_else(|| default_tag(element_type))?;

    let mut locator = tag.to_string();
    if let Some(class) = metadata
        .class_name
        .as_deref()
        .and_then(|classes| classes.split_whitespace().next())
    {
        let class = CLASS_UNSAFE.replace_all(class, "");
        if !class.is_empty() {
            locator.push('.');
            locator.push_str(&class);
        }
    }

    Some(format!("this.page.locator('{}')", escape_quotes(&locator)))
}

/// Escapes a value for a single-quoted JS string.
fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escapes a value for a double-quoted CSS attribute value.
fn escape_attribute(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
