pub mod patterns;
pub mod scenario;
pub mod step;
pub mod validate;

pub use scenario::parse;
pub use step::{STEP_RULES, StepRule, parse_step};
pub use validate::validate;

use scout_common::scenario::ScenarioDocument;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read scenario file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a UTF-8 scenario file and parses it.
///
/// Only I/O can fail here; content problems surface through [`validate`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<ScenarioDocument, ParseError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse(&content))
}
