use std::env;

pub mod pair_cases;
pub mod tree_cases;

#[cfg(feature = "tree-walk")]
pub mod walk;

/// Substring filter over fixture case names, read from `DOM_NESTING_FIXTURE`.
pub struct FixtureFilter {
    raw: Option<String>,
}

impl FixtureFilter {
    pub fn from_env() -> Self {
        Self::new(env::var("DOM_NESTING_FIXTURE").ok())
    }

    pub fn new(raw: Option<String>) -> Self {
        Self {
            raw: raw.filter(|value| !value.is_empty()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let Some(filter) = &self.raw else {
            return true;
        };
        name.contains(filter)
    }
}

/// Renders a `(child, parent)` pair the way failure reports list them.
pub fn format_pair(child: &str, parent: &str) -> String {
    format!("<{child}> in <{parent}>")
}

/// Multiset difference report between expected and actual entries, or `None`
/// when both hold the same entries in the same order.
pub fn diff_entries(expected: &[String], actual: &[String]) -> Option<String> {
    if expected == actual {
        return None;
    }
    use std::fmt::Write;
    let mut out = String::new();
    let mut unmatched: Vec<&String> = actual.iter().collect();
    let mut missing = Vec::new();
    for entry in expected {
        match unmatched.iter().position(|candidate| *candidate == entry) {
            Some(index) => {
                unmatched.remove(index);
            }
            None => missing.push(entry),
        }
    }
    for entry in &missing {
        let _ = writeln!(&mut out, "  missing:    {entry}");
    }
    for entry in &unmatched {
        let _ = writeln!(&mut out, "  unexpected: {entry}");
    }
    if missing.is_empty() && unmatched.is_empty() {
        let _ = writeln!(&mut out, "  same entries, different order");
    }
    let _ = writeln!(
        &mut out,
        "expected {} entries, actual {} entries",
        expected.len(),
        actual.len()
    );
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::{FixtureFilter, diff_entries};

    #[test]
    fn empty_filter_matches_everything() {
        assert!(FixtureFilter::new(None).matches("anything"));
        assert!(FixtureFilter::new(Some(String::new())).matches("anything"));
        let filter = FixtureFilter::new(Some("table".to_string()));
        assert!(filter.matches("table-rows"));
        assert!(!filter.matches("lists"));
    }

    #[test]
    fn diff_reports_missing_and_unexpected() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["b".to_string(), "c".to_string()];
        let report = diff_entries(&expected, &actual).expect("entries differ");
        assert!(report.contains("missing:    a"));
        assert!(report.contains("unexpected: c"));
        assert!(diff_entries(&expected, &expected).is_none());
    }
}
