//! Stack of open elements carrying saved ancestor contexts.
//!
//! The engine leaves depth tracking to callers. `NestingStack` is the usual
//! way to do it: each open element keeps the `AncestorInfo` that was current
//! before it was folded in, so closing restores the enclosing scope exactly.

use std::fmt;

use crate::ancestor::{AncestorInfo, ElementName};
use crate::categories::{IMPLIED_END_TAG_SET, VOID_SET};
use crate::validate::{is_valid_child, validate_dom_nesting};

const LOG_TARGET: &str = "html.nesting.stack";

#[derive(Clone, Debug)]
pub struct NestingStackConfig {
    /// Emit the invalid-nesting diagnostic from `open`.
    /// When false, verdicts are computed silently.
    pub report_violations: bool,
}

impl Default for NestingStackConfig {
    fn default() -> Self {
        Self {
            report_violations: true,
        }
    }
}

/// Per-stack counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NestingStats {
    pub checked: u64,
    pub rejected: u64,
    pub max_depth: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NestingStackError {
    /// No open element has this name.
    NotOpen { tag: String },
    /// An element without an implied end tag is open above the target.
    Misnested { tag: String, open: ElementName },
}

impl fmt::Display for NestingStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestingStackError::NotOpen { tag } => write!(f, "no open <{tag}> to close"),
            NestingStackError::Misnested { tag, open } => {
                write!(f, "cannot close <{tag}> while <{open}> is open")
            }
        }
    }
}

impl std::error::Error for NestingStackError {}

#[derive(Clone, Debug)]
struct OpenFrame {
    name: ElementName,
    /// Context before this element was folded in.
    saved: AncestorInfo,
}

/// Open elements of one construction pass.
///
/// `clone` the stack to branch construction speculatively.
#[derive(Clone, Debug, Default)]
pub struct NestingStack {
    config: NestingStackConfig,
    frames: Vec<OpenFrame>,
    /// Fragment context: the parent at depth zero, if any.
    context_parent: Option<ElementName>,
    context_info: AncestorInfo,
    info: AncestorInfo,
    stats: NestingStats,
}

impl NestingStack {
    pub fn new(config: NestingStackConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Starts below a fragment context. The context tags are folded in
    /// without validation; the last one is the parent for top-level inserts
    /// and cannot be closed.
    pub fn with_context<'a>(
        config: NestingStackConfig,
        context: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut info = AncestorInfo::default();
        let mut parent = None;
        for tag in context {
            info.fold(tag);
            parent = Some(ElementName::new(tag));
        }
        Self {
            config,
            frames: Vec::new(),
            context_parent: parent,
            context_info: info.clone(),
            info,
            stats: NestingStats::default(),
        }
    }

    /// Innermost open element, falling back to the fragment context.
    pub fn current(&self) -> Option<&ElementName> {
        self.frames
            .last()
            .map(|frame| &frame.name)
            .or(self.context_parent.as_ref())
    }

    pub fn ancestor_info(&self) -> &AncestorInfo {
        &self.info
    }

    /// Number of elements opened on this stack (fragment context excluded).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn stats(&self) -> NestingStats {
        self.stats
    }

    /// Open element names, outermost first.
    pub fn iter_names(&self) -> impl Iterator<Item = &ElementName> + '_ {
        self.frames.iter().map(|frame| &frame.name)
    }

    /// Verdict for inserting `child` under the current element. No state
    /// change, no diagnostic.
    pub fn check(&self, child: &str) -> bool {
        match self.current() {
            Some(parent) => is_valid_child(parent.as_str(), child, &self.info),
            None => true,
        }
    }

    /// Inserts `tag` under the current element and returns the verdict.
    ///
    /// The insertion is recorded whatever the verdict; void elements are
    /// inserted but never opened.
    pub fn open(&mut self, tag: &str) -> bool {
        let parent = self.current().map(ElementName::as_str);
        let valid = if self.config.report_violations {
            validate_dom_nesting(tag, parent, &self.info)
        } else {
            match parent {
                Some(parent) => is_valid_child(parent, tag, &self.info),
                None => true,
            }
        };
        self.stats.checked += 1;
        if !valid {
            self.stats.rejected += 1;
        }

        if VOID_SET.contains_name(tag) {
            log::trace!(target: LOG_TARGET, "insert void <{tag}> valid={valid}");
            return valid;
        }

        let saved = self.info.clone();
        self.info.fold(tag);
        self.frames.push(OpenFrame {
            name: ElementName::new(tag),
            saved,
        });
        self.stats.max_depth = self.stats.max_depth.max(self.frames.len());
        log::trace!(
            target: LOG_TARGET,
            "open <{tag}> depth={} valid={valid}",
            self.frames.len()
        );
        valid
    }

    /// Closes the nearest open `tag`, popping implied-end-tag elements above
    /// it. On error the stack is unchanged.
    pub fn close(&mut self, tag: &str) -> Result<ElementName, NestingStackError> {
        let Some(index) = self.frames.iter().rposition(|frame| frame.name == tag) else {
            return Err(NestingStackError::NotOpen {
                tag: tag.to_string(),
            });
        };
        if let Some(blocker) = self.frames[index + 1..]
            .iter()
            .rev()
            .find(|frame| !frame.name.tag().is_some_and(|t| IMPLIED_END_TAG_SET.contains(t)))
        {
            return Err(NestingStackError::Misnested {
                tag: tag.to_string(),
                open: blocker.name.clone(),
            });
        }
        // `index` came from `rposition`, so `closed` starts with the target.
        let mut closed = self.frames.split_off(index);
        let frame = closed.swap_remove(0);
        self.info = frame.saved;
        log::trace!(
            target: LOG_TARGET,
            "close <{tag}> depth={}",
            self.frames.len()
        );
        Ok(frame.name)
    }

    /// Pops the innermost open element, restoring its enclosing context.
    pub fn pop(&mut self) -> Option<ElementName> {
        let frame = self.frames.pop()?;
        self.info = frame.saved;
        Some(frame.name)
    }

    /// Closes every open element; the fragment context and stats are kept.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.info = self.context_info.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::{NestingStack, NestingStackConfig, NestingStackError};
    use crate::ancestor::{AncestorInfo, ElementName};
    use crate::tags::Tag;

    fn quiet() -> NestingStack {
        NestingStack::new(NestingStackConfig {
            report_violations: false,
        })
    }

    #[test]
    fn open_pop_and_current_are_deterministic() {
        let mut stack = quiet();
        assert!(stack.current().is_none());
        assert!(stack.open("div"));
        assert!(stack.open("span"));
        assert_eq!(stack.current().map(ElementName::as_str), Some("span"));
        assert_eq!(stack.pop(), Some(ElementName::Known(Tag::Span)));
        assert_eq!(stack.current().map(ElementName::as_str), Some("div"));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn top_level_inserts_are_always_valid() {
        let mut stack = quiet();
        assert!(stack.check("li"));
        assert!(stack.open("li"));
    }

    #[test]
    fn closing_restores_the_enclosing_scope() {
        let mut stack = quiet();
        stack.open("div");
        let before = stack.ancestor_info().clone();
        stack.open("form");
        assert_eq!(stack.ancestor_info().form_tag, Some(Tag::Form));
        assert!(!stack.check("form"));
        assert_eq!(stack.close("form"), Ok(ElementName::Known(Tag::Form)));
        assert_eq!(stack.ancestor_info(), &before);
        assert!(stack.check("form"));
    }

    #[test]
    fn invalid_inserts_are_still_recorded() {
        let mut stack = quiet();
        stack.open("p");
        assert!(!stack.open("div"));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current().map(ElementName::as_str), Some("div"));
        let stats = stack.stats();
        assert_eq!(stats.checked, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.max_depth, 2);
        stack.pop();
        stack.pop();
        assert_eq!(stack.stats().max_depth, 2);
    }

    #[test]
    fn void_elements_are_never_opened() {
        let mut stack = quiet();
        stack.open("p");
        assert!(stack.open("br"));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current().map(ElementName::as_str), Some("p"));
        assert!(stack.open("img"));
        assert!(stack.check("span"));
    }

    #[test]
    fn close_pops_implied_end_tag_elements() {
        let mut stack = quiet();
        stack.open("ul");
        stack.open("li");
        stack.open("p");
        assert_eq!(
            stack.iter_names().map(ElementName::as_str).collect::<Vec<_>>(),
            vec!["ul", "li", "p"]
        );
        assert_eq!(stack.close("ul"), Ok(ElementName::Known(Tag::Ul)));
        assert_eq!(stack.iter_names().count(), 0);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.ancestor_info(), &AncestorInfo::default());
    }

    #[test]
    fn close_across_a_non_implied_element_fails_without_change() {
        let mut stack = quiet();
        stack.open("div");
        stack.open("span");
        let before = stack.ancestor_info().clone();
        assert_eq!(
            stack.close("div"),
            Err(NestingStackError::Misnested {
                tag: "div".to_string(),
                open: ElementName::Known(Tag::Span),
            })
        );
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.ancestor_info(), &before);
        assert_eq!(
            stack.close("table"),
            Err(NestingStackError::NotOpen {
                tag: "table".to_string()
            })
        );
    }

    #[test]
    fn close_matches_the_nearest_open_element() {
        let mut stack = quiet();
        stack.open("div");
        stack.open("section");
        stack.open("div");
        stack.close("div").expect("inner div closes");
        assert_eq!(stack.current().map(ElementName::as_str), Some("section"));
        assert_eq!(
            stack.iter_names().map(ElementName::as_str).collect::<Vec<_>>(),
            vec!["div", "section"]
        );
        assert_eq!(stack.ancestor_info().current_tag, Some(ElementName::Known(Tag::Section)));
    }

    #[test]
    fn unknown_elements_open_and_close_by_name() {
        let mut stack = quiet();
        stack.open("my-widget");
        assert!(stack.check("div"));
        assert_eq!(
            stack.close("my-widget").map(|name| name.to_string()),
            Ok("my-widget".to_string())
        );
    }

    #[test]
    fn fragment_context_is_the_top_level_parent() {
        let mut stack =
            NestingStack::with_context(NestingStackConfig::default(), ["form", "ul"]);
        assert_eq!(stack.current().map(ElementName::as_str), Some("ul"));
        assert!(stack.check("li"));
        assert!(!stack.check("div"));
        assert!(!stack.check("form"));
        assert_eq!(
            stack.close("ul"),
            Err(NestingStackError::NotOpen {
                tag: "ul".to_string()
            })
        );
        stack.open("li");
        stack.clear();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.ancestor_info().form_tag, Some(Tag::Form));
        assert_eq!(stack.ancestor_info().list_item_tag_autoclosing, None);
    }

    #[test]
    fn cloned_stacks_branch_independently() {
        let mut stack = quiet();
        stack.open("div");
        let mut branch = stack.clone();
        branch.open("a");
        assert!(!branch.check("a"));
        assert!(stack.check("a"));
    }
}
