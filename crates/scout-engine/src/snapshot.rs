//! Parser for the YAML-ish accessibility snapshot emitted by the Playwright
//! MCP server.
//!
//! Only lines that carry a `[ref=eN]` handle are interesting; everything else
//! (page url, headings without refs, `/url:` children) is dropped.

use lazy_static::lazy_static;
use regex::Regex;
use scout_common::protocol::SnapshotElement;

lazy_static! {
    /// `- textbox "Email" [ref=e12]` -> (1: role, 2: optional name, 3: ref)
    ///
    /// Other bracketed attributes (`[level=1]`, `[cursor=pointer]`) may sit
    /// between the name and the ref.
    static ref SNAPSHOT_LINE: Regex = Regex::new(
        r#"-\s+([A-Za-z]+(?: [A-Za-z]+)*)(?:\s+"((?:[^"\\]|\\.)*)")?.*?\[ref=(e\d+)\]"#
    )
    .unwrap();
}

pub fn parse_snapshot(text: &str) -> Vec<SnapshotElement> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<SnapshotElement> {
    let caps = SNAPSHOT_LINE.captures(line)?;
    let name = caps
        .get(2)
        .map(|m| unescape(m.as_str()).trim().to_string())
        .filter(|n| !n.is_empty());

    Some(SnapshotElement {
        role: caps.get(1)?.as_str().to_lowercase(),
        name,
        reference: caps.get(3)?.as_str().to_string(),
        raw: line.trim().to_string(),
    })
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
