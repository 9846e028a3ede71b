//! Whole-tree cases stored as a JSON array.

use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeCase {
    pub name: String,
    /// Fragment context the tree is inserted under, outermost first.
    #[serde(default)]
    pub context: Vec<String>,
    pub tree: Vec<TreeNode>,
    /// Expected rejected insertions as `[child, parent]`, in document order.
    #[serde(default)]
    pub invalid: Vec<(String, String)>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeNode {
    pub tag: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

pub fn parse_tree_cases(content: &str, origin: &str) -> Vec<TreeCase> {
    let cases: Vec<TreeCase> = serde_json::from_str(content)
        .unwrap_or_else(|err| panic!("failed to parse tree cases {origin}: {err}"));
    for case in &cases {
        assert!(!case.tree.is_empty(), "tree case '{}' has no nodes", case.name);
    }
    cases
}

pub fn load_tree_cases(path: &Path) -> Vec<TreeCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read tree cases {path:?}: {err}"));
    parse_tree_cases(&content, &path.display().to_string())
}
