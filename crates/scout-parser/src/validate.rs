use scout_common::scenario::{ScenarioDocument, ValidationReport};

/// Checks that a parsed document is complete enough to generate tests from.
pub fn validate(document: &ScenarioDocument) -> ValidationReport {
    let mut errors = Vec::new();

    if document.pages.is_empty() {
        errors.push("no pages defined".to_string());
    }

    for (index, page) in document.pages.iter().enumerate() {
        let label = label(&page.name, index);
        if page.name.is_empty() {
            errors.push(format!("page {}: missing name", index + 1));
        }
        if page.path.is_empty() {
            errors.push(format!("page {}: missing path", label));
        }
    }

    if document.flows.is_empty() {
        errors.push("no test flows defined".to_string());
    }

    for (index, flow) in document.flows.iter().enumerate() {
        let label = label(&flow.name, index);
        if flow.name.is_empty() {
            errors.push(format!("flow {}: missing name", index + 1));
        }
        if flow.steps.is_empty() {
            errors.push(format!("flow {}: has no steps", label));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Name if present, otherwise the 1-based position.
fn label(name: &str, index: usize) -> String {
    if name.is_empty() {
        (index + 1).to_string()
    } else {
        name.to_string()
    }
}
