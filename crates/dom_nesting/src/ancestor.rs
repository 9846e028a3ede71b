//! Ancestor scope tracking.
//!
//! `AncestorInfo` records, for each scope-defining category, the nearest
//! enclosing tag of that category on the current insertion path. Folding a
//! tag in overwrites the matching field; fields are never stacked. Popping back
//! out of a subtree is the caller's concern (see `NestingStack`).

use std::fmt;
use std::sync::Arc;

use crate::tags::Tag;

/// Tag name as seen by the tracker: a known `Tag` or any other name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ElementName {
    Known(Tag),
    Other(Arc<str>),
}

impl ElementName {
    /// Known names never allocate.
    pub fn new(name: &str) -> Self {
        match Tag::from_name(name) {
            Some(tag) => ElementName::Known(tag),
            None => ElementName::Other(Arc::from(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ElementName::Known(tag) => tag.as_str(),
            ElementName::Other(name) => &**name,
        }
    }

    pub fn tag(&self) -> Option<Tag> {
        match self {
            ElementName::Known(tag) => Some(*tag),
            ElementName::Other(_) => None,
        }
    }
}

impl From<Tag> for ElementName {
    fn from(tag: Tag) -> Self {
        ElementName::Known(tag)
    }
}

impl PartialEq<str> for ElementName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ElementName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope-defining categories. `dd` and `dt` share `DefinitionItem`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeCategory {
    Form,
    Anchor,
    Button,
    Paragraph,
    ListItem,
    DefinitionItem,
}

impl ScopeCategory {
    pub const ALL: [ScopeCategory; 6] = [
        ScopeCategory::Form,
        ScopeCategory::Anchor,
        ScopeCategory::Button,
        ScopeCategory::Paragraph,
        ScopeCategory::ListItem,
        ScopeCategory::DefinitionItem,
    ];

    pub const fn of(tag: Tag) -> Option<ScopeCategory> {
        match tag {
            Tag::Form => Some(ScopeCategory::Form),
            Tag::A => Some(ScopeCategory::Anchor),
            Tag::Button => Some(ScopeCategory::Button),
            Tag::P => Some(ScopeCategory::Paragraph),
            Tag::Li => Some(ScopeCategory::ListItem),
            Tag::Dd | Tag::Dt => Some(ScopeCategory::DefinitionItem),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScopeCategory::Form => "form",
            ScopeCategory::Anchor => "anchor",
            ScopeCategory::Button => "button",
            ScopeCategory::Paragraph => "paragraph",
            ScopeCategory::ListItem => "list item",
            ScopeCategory::DefinitionItem => "definition list item",
        }
    }
}

impl fmt::Display for ScopeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scope context for one insertion path.
///
/// Owned by a single construction pass. Clone it before branching, since
/// `fold` overwrites fields in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AncestorInfo {
    /// Most recently opened tag.
    pub current_tag: Option<ElementName>,
    pub form_tag: Option<Tag>,
    pub a_tag_in_scope: Option<Tag>,
    pub button_tag_in_scope: Option<Tag>,
    pub p_tag_in_button_scope: Option<Tag>,
    pub list_item_tag_autoclosing: Option<Tag>,
    /// Shared by `dd` and `dt`.
    pub dl_item_tag_autoclosing: Option<Tag>,
}

impl AncestorInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nearest open tag of `category`, if any.
    pub fn scope(&self, category: ScopeCategory) -> Option<Tag> {
        match category {
            ScopeCategory::Form => self.form_tag,
            ScopeCategory::Anchor => self.a_tag_in_scope,
            ScopeCategory::Button => self.button_tag_in_scope,
            ScopeCategory::Paragraph => self.p_tag_in_button_scope,
            ScopeCategory::ListItem => self.list_item_tag_autoclosing,
            ScopeCategory::DefinitionItem => self.dl_item_tag_autoclosing,
        }
    }

    fn scope_mut(&mut self, category: ScopeCategory) -> &mut Option<Tag> {
        match category {
            ScopeCategory::Form => &mut self.form_tag,
            ScopeCategory::Anchor => &mut self.a_tag_in_scope,
            ScopeCategory::Button => &mut self.button_tag_in_scope,
            ScopeCategory::Paragraph => &mut self.p_tag_in_button_scope,
            ScopeCategory::ListItem => &mut self.list_item_tag_autoclosing,
            ScopeCategory::DefinitionItem => &mut self.dl_item_tag_autoclosing,
        }
    }

    /// Folds a newly opened `tag` into this context, one level deeper.
    pub fn fold(&mut self, tag: &str) {
        let name = ElementName::new(tag);
        if let Some(known) = name.tag()
            && let Some(category) = ScopeCategory::of(known)
        {
            *self.scope_mut(category) = Some(known);
        }
        self.current_tag = Some(name);
    }

    /// Copy of this context with `tag` folded in; `self` is left untouched.
    pub fn folded(&self, tag: &str) -> AncestorInfo {
        let mut next = self.clone();
        next.fold(tag);
        next
    }

    /// Whether any scope-defining category is currently open.
    pub fn has_open_scope(&self) -> bool {
        ScopeCategory::ALL
            .iter()
            .any(|category| self.scope(*category).is_some())
    }
}

/// Folds `tag` into `info`, starting from an empty context when `info` is
/// `None`.
pub fn update_ancestor_info(info: Option<AncestorInfo>, tag: &str) -> AncestorInfo {
    let mut info = info.unwrap_or_default();
    info.fold(tag);
    info
}

#[cfg(test)]
mod tests {
    use super::{AncestorInfo, ElementName, ScopeCategory, update_ancestor_info};
    use crate::tags::Tag;

    #[test]
    fn fold_from_none_starts_empty() {
        let info = update_ancestor_info(None, "div");
        assert_eq!(info.current_tag, Some(ElementName::Known(Tag::Div)));
        assert!(!info.has_open_scope());
    }

    #[test]
    fn scope_survives_unrelated_tags() {
        let info = update_ancestor_info(Some(update_ancestor_info(None, "form")), "div");
        assert_eq!(info.form_tag, Some(Tag::Form));
        assert_eq!(info.current_tag, Some(ElementName::Known(Tag::Div)));
        assert_eq!(info.a_tag_in_scope, None);
    }

    #[test]
    fn reentering_a_category_overwrites_the_field() {
        let info = update_ancestor_info(Some(update_ancestor_info(None, "form")), "form");
        assert_eq!(info.form_tag, Some(Tag::Form));
        assert_eq!(info.current_tag, Some(ElementName::Known(Tag::Form)));

        let info = AncestorInfo::new().folded("dt").folded("dd");
        assert_eq!(info.dl_item_tag_autoclosing, Some(Tag::Dd));
    }

    #[test]
    fn every_scope_key_maps_to_its_field() {
        let cases = [
            ("form", ScopeCategory::Form),
            ("a", ScopeCategory::Anchor),
            ("button", ScopeCategory::Button),
            ("p", ScopeCategory::Paragraph),
            ("li", ScopeCategory::ListItem),
            ("dd", ScopeCategory::DefinitionItem),
            ("dt", ScopeCategory::DefinitionItem),
        ];
        for (tag, category) in cases {
            let info = update_ancestor_info(None, tag);
            assert_eq!(info.scope(category).map(Tag::as_str), Some(tag));
            for other in ScopeCategory::ALL {
                if other != category {
                    assert_eq!(info.scope(other), None, "{tag} leaked into {other}");
                }
            }
        }
    }

    #[test]
    fn fold_is_deterministic() {
        let base = AncestorInfo::new().folded("a").folded("span");
        assert_eq!(base.folded("li"), base.folded("li"));
        // `folded` leaves the source context untouched.
        assert_eq!(base.current_tag, Some(ElementName::Known(Tag::Span)));
        assert_eq!(base.list_item_tag_autoclosing, None);
    }

    #[test]
    fn unknown_tags_update_only_current_tag() {
        let info = AncestorInfo::new().folded("p").folded("my-widget");
        assert_eq!(
            info.current_tag.as_ref().map(ElementName::as_str),
            Some("my-widget")
        );
        assert_eq!(info.current_tag.as_ref().and_then(ElementName::tag), None);
        assert_eq!(info.p_tag_in_button_scope, Some(Tag::P));
    }

    #[test]
    fn fold_does_not_normalize_case() {
        let info = update_ancestor_info(None, "FORM");
        assert_eq!(info.form_tag, None);
        assert_eq!(info.current_tag.as_ref().map(ElementName::as_str), Some("FORM"));
    }
}
