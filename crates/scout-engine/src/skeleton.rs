//! Placeholder handling for generated page-object skeletons.
//!
//! Skeletons locate elements as `this.page.locator('PLACEHOLDER_<name>')`.
//! The element name drives both the element type and the matching tokens,
//! and resolved selectors are written back over the placeholder call.

use crate::selector::split_words;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use scout_common::protocol::SelectorMatch;
use scout_common::scenario::{ElementSpec, ElementType, PageDefinition, PageObjectSpec};

lazy_static! {
    /// `PLACEHOLDER_emailInput` -> (1: element name)
    static ref PLACEHOLDER: Regex = Regex::new(r"PLACEHOLDER_(\w+)").unwrap();

    /// `this.page.locator('PLACEHOLDER_emailInput')`, either quote style -> (1: element name)
    static ref PLACEHOLDER_LOCATOR: Regex =
        Regex::new(r#"this\.page\.locator\(\s*['"]PLACEHOLDER_(\w+)['"]\s*\)"#).unwrap();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorRewrite {
    pub code: String,
    /// Element names whose placeholder was replaced.
    pub replaced: Vec<String>,
    /// Element names left as placeholders.
    pub unresolved: Vec<String>,
}

/// One `ElementSpec` per distinct placeholder, in order of first appearance.
pub fn extract_element_specs(code: &str) -> Vec<ElementSpec> {
    let mut specs: Vec<ElementSpec> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(code) {
        let name = &caps[1];
        if specs.iter().any(|spec| spec.name == name) {
            continue;
        }
        let words = split_words(name);
        let purpose = words.join(" ").to_lowercase();
        specs.push(ElementSpec::new(name, purpose, infer_element_type(&words)));
    }
    specs
}

/// Element type from the last word of the name (`loginButton` -> Button).
fn infer_element_type(words: &[String]) -> ElementType {
    let last = words.last().map(|w| w.to_lowercase()).unwrap_or_default();
    match last.as_str() {
        "input" | "field" | "textarea" => ElementType::Input,
        "button" | "btn" => ElementType::Button,
        "link" => ElementType::Link,
        "select" | "dropdown" => ElementType::Select,
        "checkbox" => ElementType::Checkbox,
        "radio" => ElementType::Radio,
        _ => ElementType::Text,
    }
}

pub fn page_object_spec(page: &PageDefinition, code: &str) -> PageObjectSpec {
    PageObjectSpec {
        name: page.name.clone(),
        path: page.path.clone(),
        description: page.description.clone(),
        required_elements: extract_element_specs(code),
    }
}

/// Replaces placeholder locators with resolved selectors.
///
/// Placeholders without a resolved match are left untouched so they can be
/// completed by hand.
pub fn apply_selectors(code: &str, matches: &[SelectorMatch]) -> SelectorRewrite {
    let mut replaced = Vec::new();
    let mut unresolved = Vec::new();

    let rewritten = PLACEHOLDER_LOCATOR.replace_all(code, |caps: &Captures| {
        let name = &caps[1];
        let selector = matches
            .iter()
            .find(|m| m.element_name == name)
            .and_then(|m| m.selector.as_deref());
        match selector {
            Some(selector) => {
                push_unique(&mut replaced, name);
                selector.to_string()
            }
            None => {
                push_unique(&mut unresolved, name);
                caps[0].to_string()
            }
        }
    });

    SelectorRewrite {
        code: rewritten.into_owned(),
        replaced,
        unresolved,
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
