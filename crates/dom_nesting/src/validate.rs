//! Nesting validation engine.
//!
//! A pure function of (parent, child, ancestor context): it never inspects a
//! tree and never mutates the context. Checks run in a fixed order and the
//! first failing one decides the verdict:
//! 1. void parents admit nothing;
//! 2. the parent's content kind, when the parent has a rule;
//! 3. the parent's forbidden children, whatever the content kind;
//! 4. the child's scope category against the open scopes, for any parent.

use std::fmt;

use crate::ancestor::{AncestorInfo, ScopeCategory};
use crate::categories::{PHRASING_SET, VOID_SET};
use crate::rules::{ContentKind, TagRule, rule_for};
use crate::tags::Tag;

/// Log target of the invalid-nesting diagnostic.
pub const LOG_TARGET: &str = "html.nesting";

/// Which check rejected a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NestingViolation {
    VoidParent { parent: Tag },
    /// Parent only admits phrasing content.
    NotPhrasing { parent: Tag },
    /// Child is outside the parent's explicit children set.
    NotPermitted { parent: Tag },
    ForbiddenChild { parent: Tag, child: Tag },
    /// A tag of the child's scope category is already open.
    ScopeConflict {
        category: ScopeCategory,
        open: Tag,
    },
}

impl fmt::Display for NestingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestingViolation::VoidParent { parent } => {
                write!(f, "<{parent}> is a void element and cannot have children")
            }
            NestingViolation::NotPhrasing { parent } => {
                write!(f, "<{parent}> only accepts phrasing content")
            }
            NestingViolation::NotPermitted { parent } => {
                write!(f, "child is not in the content model of <{parent}>")
            }
            NestingViolation::ForbiddenChild { parent, child } => {
                write!(f, "<{child}> is forbidden as a child of <{parent}>")
            }
            NestingViolation::ScopeConflict { category, open } => {
                write!(f, "a {category} scope is already open (<{open}>)")
            }
        }
    }
}

impl std::error::Error for NestingViolation {}

/// The diagnostic reported for an invalid insertion.
///
/// The rendered text is relied upon by external tooling and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidNesting<'a> {
    pub child: &'a str,
    pub parent: &'a str,
}

impl fmt::Display for InvalidNesting<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid HTML nesting: <{}> inside <{}>. See HTML specification for valid nesting rules.",
            self.child, self.parent
        )
    }
}

fn check_rule(rule: &TagRule, child: Option<Tag>) -> Result<(), NestingViolation> {
    let parent = rule.tag;
    match rule.content_kind {
        ContentKind::Any | ContentKind::Transparent => {}
        ContentKind::PhrasingOnly => {
            if !child.is_some_and(|tag| PHRASING_SET.contains(tag)) {
                return Err(NestingViolation::NotPhrasing { parent });
            }
        }
        ContentKind::ExplicitSet(allowed) => {
            if !child.is_some_and(|tag| allowed.contains(tag)) {
                return Err(NestingViolation::NotPermitted { parent });
            }
        }
    }
    if let Some(child) = child
        && rule.forbidden_children.contains(child)
    {
        return Err(NestingViolation::ForbiddenChild { parent, child });
    }
    Ok(())
}

fn check_context(child: Option<Tag>, info: &AncestorInfo) -> Result<(), NestingViolation> {
    let Some(category) = child.and_then(ScopeCategory::of) else {
        return Ok(());
    };
    match info.scope(category) {
        Some(open) => Err(NestingViolation::ScopeConflict { category, open }),
        None => Ok(()),
    }
}

/// Checks inserting `child_tag` under `parent_tag` and reports which rule
/// rejected it.
pub fn check_child(
    parent_tag: &str,
    child_tag: &str,
    ancestor_info: &AncestorInfo,
) -> Result<(), NestingViolation> {
    let child = Tag::from_name(child_tag);
    if let Some(parent) = Tag::from_name(parent_tag) {
        if VOID_SET.contains(parent) {
            return Err(NestingViolation::VoidParent { parent });
        }
        if let Some(rule) = rule_for(parent) {
            check_rule(rule, child)?;
        }
    }
    check_context(child, ancestor_info)
}

pub fn is_valid_child(parent_tag: &str, child_tag: &str, ancestor_info: &AncestorInfo) -> bool {
    check_child(parent_tag, child_tag, ancestor_info).is_ok()
}

/// Validates an insertion and logs the diagnostic on failure.
///
/// A `None` parent (document root, detached fragment) is always valid. The
/// diagnostic is advisory: the verdict is the same with or without a logger.
pub fn validate_dom_nesting(
    child_tag: &str,
    parent_tag: Option<&str>,
    ancestor_info: &AncestorInfo,
) -> bool {
    let Some(parent_tag) = parent_tag else {
        return true;
    };
    let valid = is_valid_child(parent_tag, child_tag, ancestor_info);
    if !valid {
        log::error!(
            target: LOG_TARGET,
            "{}",
            InvalidNesting {
                child: child_tag,
                parent: parent_tag,
            }
        );
    }
    valid
}
