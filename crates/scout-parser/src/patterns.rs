//! Named line patterns used by the scenario parser.
//!
//! Each pattern documents what its capture groups hold; callers go through
//! the helper functions rather than touching the regexes directly.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `1. 로그인 버튼 클릭` -> (1: order digits, 2: step text)
    static ref STEP_LINE: Regex = Regex::new(r"^(\d+)\.\s+(.+)$").unwrap();

    /// First backtick-quoted value anywhere in the text -> (1: value)
    static ref BACKTICK_VALUE: Regex = Regex::new(r"`([^`]+)`").unwrap();

    /// Backtick value directly after a colon -> (1: value)
    static ref LABELED_BACKTICK_VALUE: Regex = Regex::new(r":\s*`([^`]+)`").unwrap();

    /// ASCII word token ending in `Page` -> (1: page name)
    static ref PAGE_NAME: Regex = Regex::new(r"([A-Za-z0-9_]+Page)").unwrap();

    /// `이메일 입력` -> (1: target)
    static ref INPUT_TARGET: Regex = Regex::new(r"(.+?)\s+입력").unwrap();

    /// `로그인 버튼 클릭` -> (1: target, 2: optional `버튼` qualifier)
    static ref CLICK_TARGET: Regex = Regex::new(r"(.+?)\s+(버튼\s+)?클릭").unwrap();

    /// `환영 메시지 표시 확인` -> (1: target)
    static ref DISPLAYED_TARGET: Regex = Regex::new(r"(.+?)\s+표시\s+확인").unwrap();

    /// `로그아웃 버튼 확인` -> (1: target)
    static ref VISIBLE_TARGET: Regex = Regex::new(r"(.+?)\s+확인").unwrap();
}

/// Splits a numbered step line into its literal order and text.
///
/// Returns `None` when the line is not a step or the number does not fit `u32`.
pub fn step_line(line: &str) -> Option<(u32, &str)> {
    let caps = STEP_LINE.captures(line)?;
    let order = caps.get(1)?.as_str().parse().ok()?;
    Some((order, caps.get(2)?.as_str().trim()))
}

pub fn backtick_value(text: &str) -> Option<&str> {
    capture(&BACKTICK_VALUE, text)
}

pub fn page_name(text: &str) -> Option<&str> {
    capture(&PAGE_NAME, text)
}

pub fn input_target(text: &str) -> Option<&str> {
    capture(&INPUT_TARGET, text).map(str::trim)
}

pub fn click_target(text: &str) -> Option<&str> {
    capture(&CLICK_TARGET, text).map(str::trim)
}

pub fn displayed_target(text: &str) -> Option<&str> {
    capture(&DISPLAYED_TARGET, text).map(str::trim)
}

pub fn visible_target(text: &str) -> Option<&str> {
    capture(&VISIBLE_TARGET, text).map(str::trim)
}

/// Value of a `- **label**: value` bullet.
///
/// Prefers a backtick-quoted value after the colon, then everything after the
/// first colon, trimmed. Lines without a colon yield an empty string.
pub fn attribute_value(line: &str) -> String {
    if let Some(value) = capture(&LABELED_BACKTICK_VALUE, line) {
        return value.to_string();
    }
    match line.find(':') {
        Some(idx) => line[idx + 1..].trim().to_string(),
        None => String::new(),
    }
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
