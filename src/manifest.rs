//! Rule manifests: one `<group> <rule>` per line.
//!
//! ```text
//! # resets first
//! -1 *{box-sizing:border-box}
//! 2  .button{display:flex}
//! ```

use ordered_sheet::{GroupError, parse_group};
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub group: i32,
    pub rule: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ManifestError {
    BadGroup { line: usize, source: GroupError },
    MissingRule { line: usize },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::BadGroup { line, source } => write!(f, "line {line}: {source}"),
            ManifestError::MissingRule { line } => write!(f, "line {line}: group without a rule"),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::BadGroup { source, .. } => Some(source),
            ManifestError::MissingRule { .. } => None,
        }
    }
}

pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    let mut entries = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (group, rule) = match trimmed.split_once(char::is_whitespace) {
            Some((group, rule)) => (group, rule.trim()),
            None => (trimmed, ""),
        };
        let group = parse_group(group).map_err(|source| ManifestError::BadGroup { line, source })?;
        if rule.is_empty() {
            return Err(ManifestError::MissingRule { line });
        }
        entries.push(ManifestEntry {
            group,
            rule: rule.to_string(),
        });
    }
    Ok(entries)
}
