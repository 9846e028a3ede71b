//! Single-insertion cases stored as TOML `[[case]]` tables.

use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PairCaseFile {
    #[serde(rename = "case", default)]
    cases: Vec<PairCase>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairCase {
    pub name: String,
    /// Tags folded into the context before the check, outermost first.
    #[serde(default)]
    pub ancestors: Vec<String>,
    /// Absent for root insertion.
    pub parent: Option<String>,
    pub child: String,
    pub valid: bool,
}

pub fn parse_pair_cases(content: &str, origin: &str) -> Vec<PairCase> {
    let file: PairCaseFile = toml::from_str(content)
        .unwrap_or_else(|err| panic!("failed to parse pair cases {origin}: {err}"));
    let mut seen = std::collections::BTreeSet::new();
    for case in &file.cases {
        assert!(
            seen.insert(case.name.as_str()),
            "duplicate pair case name '{}' in {origin}",
            case.name
        );
        assert!(!case.child.is_empty(), "case '{}' has an empty child", case.name);
    }
    file.cases
}

pub fn load_pair_cases(path: &Path) -> Vec<PairCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read pair cases {path:?}: {err}"));
    let cases = parse_pair_cases(&content, &path.display().to_string());
    assert!(!cases.is_empty(), "pair case file {path:?} has no cases");
    cases
}
