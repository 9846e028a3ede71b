//! HTML content-model validation.
//!
//! Decides whether an element may be inserted as a direct child of another,
//! given the tags already open on the insertion path. Tag names are expected
//! lower-cased; unknown names are accepted and impose no rule of their own.

pub mod ancestor;
pub mod categories;
pub mod rules;
pub mod stack;
pub mod tags;
pub mod validate;

pub use ancestor::{AncestorInfo, ElementName, ScopeCategory, update_ancestor_info};
pub use categories::{
    IMPLIED_END_TAGS, PHRASING_ELEMENTS, SCRIPT_SUPPORTING, VOID_ELEMENTS, implied_end_tags,
    is_implied_end_tag, is_phrasing_content, is_script_supporting, is_void_element,
    phrasing_content, script_supporting, void_elements,
};
pub use rules::{ContentKind, TagRule, rule_for, rule_for_name, rules};
pub use stack::{NestingStack, NestingStackConfig, NestingStackError, NestingStats};
pub use tags::{Tag, TagSet, UnknownTag};
pub use validate::{
    InvalidNesting, NestingViolation, check_child, is_valid_child, validate_dom_nesting,
};
