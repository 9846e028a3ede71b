//! Replays a tree case through `NestingStack`.

use dom_nesting::{NestingStack, NestingStackConfig};

use crate::tree_cases::{TreeCase, TreeNode};

/// Outcome of one replay.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Rejected insertions as `(child, parent)`, in document order.
    pub invalid: Vec<(String, String)>,
    pub max_depth: usize,
}

pub fn walk_case(case: &TreeCase, config: NestingStackConfig) -> WalkReport {
    let mut stack =
        NestingStack::with_context(config, case.context.iter().map(String::as_str));
    let mut report = WalkReport::default();
    for node in &case.tree {
        walk_node(&mut stack, node, &mut report);
    }
    assert_eq!(stack.depth(), 0, "case '{}' left elements open", case.name);
    report.max_depth = stack.stats().max_depth;
    report
}

fn walk_node(stack: &mut NestingStack, node: &TreeNode, report: &mut WalkReport) {
    let parent = stack.current().map(|name| name.to_string());
    let depth = stack.depth();
    if !stack.open(&node.tag)
        && let Some(parent) = parent
    {
        report.invalid.push((node.tag.clone(), parent));
    }
    if stack.depth() == depth {
        // Void element: nothing was opened.
        assert!(
            node.children.is_empty(),
            "void <{}> has children in the fixture",
            node.tag
        );
        return;
    }
    for child in &node.children {
        walk_node(stack, child, report);
    }
    stack
        .close(&node.tag)
        .unwrap_or_else(|err| panic!("closing <{}> failed: {err}", node.tag));
}
