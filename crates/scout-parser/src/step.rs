//! Keyword classification of scenario steps.
//!
//! The keyword sets overlap (`확인` shows up in several rules), so the table
//! order is significant: rules are tried top to bottom and the first match wins.

use crate::patterns;
use scout_common::scenario::{StepAction, TestStep};
use tracing::warn;

/// A classification rule over the raw step text.
pub struct StepRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub apply: fn(&mut TestStep),
}

pub const STEP_RULES: &[StepRule] = &[
    StepRule {
        name: "navigate",
        matches: |raw| raw.contains("이동"),
        apply: |step| {
            step.action = if step.raw.contains("확인") {
                StepAction::VerifyUrl
            } else {
                StepAction::Navigate
            };
        },
    },
    StepRule {
        name: "input",
        matches: |raw| raw.contains("입력"),
        apply: |step| {
            step.action = StepAction::Input;
            step.target = patterns::input_target(&step.raw).map(str::to_string);
        },
    },
    StepRule {
        name: "click",
        matches: |raw| raw.contains("클릭"),
        apply: |step| {
            step.action = StepAction::Click;
            step.target = patterns::click_target(&step.raw).map(str::to_string);
        },
    },
    StepRule {
        name: "verify",
        matches: |raw| raw.contains("확인"),
        apply: apply_verify,
    },
    StepRule {
        name: "wait",
        matches: |raw| raw.contains("대기"),
        apply: |step| step.action = StepAction::Wait,
    },
    StepRule {
        name: "select",
        matches: |raw| raw.contains("선택"),
        apply: |step| step.action = StepAction::Select,
    },
];

fn apply_verify(step: &mut TestStep) {
    if step.raw.contains("표시") {
        step.action = StepAction::VerifyText;
        step.target = patterns::displayed_target(&step.raw).map(str::to_string);
        step.assertion = step.value.clone();
    } else if step.raw.contains("리다이렉트") || step.raw.contains("이동") {
        step.action = StepAction::VerifyUrl;
    } else {
        step.action = StepAction::VerifyVisible;
        step.target = patterns::visible_target(&step.raw).map(str::to_string);
    }
}

/// Classifies one step line.
///
/// `value` and `page` are extracted before any rule runs. Text that no rule
/// recognises is kept as a `Click` so downstream generators always see a
/// concrete action; such steps are logged.
pub fn parse_step(order: u32, raw: &str) -> TestStep {
    let mut step = TestStep::new(order, raw, StepAction::Click);
    step.value = patterns::backtick_value(raw).map(str::to_string);
    step.page = patterns::page_name(raw).map(str::to_string);

    match STEP_RULES.iter().find(|rule| (rule.matches)(raw)) {
        Some(rule) => (rule.apply)(&mut step),
        None => warn!(order, raw, "Unclassified step, defaulting to click"),
    }

    step
}

