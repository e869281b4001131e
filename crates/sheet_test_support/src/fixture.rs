//! TOML sheet fixtures.
//!
//! ```toml
//! name = "groups sort ascending"
//! prefilled = ['[stylesheet-group="0"]{}']
//! reject = ["::-moz-"]
//! expected_text = """..."""
//! expected_container = ["..."]
//!
//! [[insert]]
//! group = 1
//! rule = ".b{color:blue}"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetFixture {
    pub name: String,
    /// Rules already in the container before the sheet is constructed.
    #[serde(default)]
    pub prefilled: Vec<String>,
    /// Selector fragments the container refuses.
    #[serde(default)]
    pub reject: Vec<String>,
    /// Replay without a container.
    #[serde(default)]
    pub detached: bool,
    #[serde(default, rename = "insert")]
    pub inserts: Vec<InsertStep>,
    pub expected_text: String,
    /// Container contents after the replay, in container order.
    #[serde(default)]
    pub expected_container: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsertStep {
    pub group: i32,
    pub rule: String,
}

pub fn load_fixture(path: &Path) -> SheetFixture {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read sheet fixture {path:?}: {err}"));
    let mut fixture: SheetFixture = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse sheet fixture {path:?}: {err}"));
    // Multi-line TOML strings end with a newline; sheet text never does.
    let trimmed = fixture.expected_text.trim_end_matches('\n').len();
    fixture.expected_text.truncate(trimmed);
    assert!(
        !(fixture.detached && (!fixture.prefilled.is_empty() || !fixture.reject.is_empty())),
        "fixture {path:?} is detached but configures a container"
    );
    fixture
}

/// Every `*.toml` fixture in `dir`, sorted by file name.
pub fn load_fixtures(dir: &Path) -> Vec<(PathBuf, SheetFixture)> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"));
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no sheet fixtures in {dir:?}");
    paths
        .into_iter()
        .map(|path| {
            let fixture = load_fixture(&path);
            (path, fixture)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_fixture() {
        let fixture: SheetFixture = toml::from_str(
            r#"
name = "one rule"
expected_text = "x"

[[insert]]
group = -1
rule = ".a{}"
"#,
        )
        .unwrap();
        assert_eq!(fixture.inserts.len(), 1);
        assert_eq!(fixture.inserts[0].group, -1);
        assert!(fixture.prefilled.is_empty());
        assert!(!fixture.detached);
        assert_eq!(fixture.expected_container, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = toml::from_str::<SheetFixture>("name = \"x\"\nexpected_text = \"\"\ngruop = 1\n");
        assert!(parsed.is_err());
    }
}
