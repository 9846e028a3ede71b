//! Content categories used by the nesting rules.
//!
//! Sets are built at compile time from the enumerated lists below and are
//! queried by exact, case-sensitive name.

use crate::tags::{Tag, TagSet};

/// Phrasing content: inline, text-level elements.
pub const PHRASING_ELEMENTS: &[Tag] = &[
    Tag::A,
    Tag::Abbr,
    Tag::Area,
    Tag::Audio,
    Tag::B,
    Tag::Bdi,
    Tag::Bdo,
    Tag::Br,
    Tag::Button,
    Tag::Canvas,
    Tag::Cite,
    Tag::Code,
    Tag::Data,
    Tag::Datalist,
    Tag::Del,
    Tag::Dfn,
    Tag::Em,
    Tag::Embed,
    Tag::I,
    Tag::Iframe,
    Tag::Img,
    Tag::Input,
    Tag::Ins,
    Tag::Kbd,
    Tag::Label,
    Tag::Link,
    Tag::Map,
    Tag::Mark,
    Tag::Math,
    Tag::Meta,
    Tag::Meter,
    Tag::Noscript,
    Tag::Object,
    Tag::Output,
    Tag::Picture,
    Tag::Progress,
    Tag::Q,
    Tag::Ruby,
    Tag::S,
    Tag::Samp,
    Tag::Script,
    Tag::Select,
    Tag::Slot,
    Tag::Small,
    Tag::Span,
    Tag::Strong,
    Tag::Sub,
    Tag::Sup,
    Tag::Svg,
    Tag::Template,
    Tag::Textarea,
    Tag::Time,
    Tag::U,
    Tag::Var,
    Tag::Video,
    Tag::Wbr,
];

pub const SCRIPT_SUPPORTING: &[Tag] = &[Tag::Script, Tag::Template];

/// Elements that never have children.
pub const VOID_ELEMENTS: &[Tag] = &[
    Tag::Area,
    Tag::Base,
    Tag::Br,
    Tag::Col,
    Tag::Embed,
    Tag::Hr,
    Tag::Img,
    Tag::Input,
    Tag::Link,
    Tag::Meta,
    Tag::Param,
    Tag::Source,
    Tag::Track,
    Tag::Wbr,
];

/// Elements whose end tag may be implied by the parser.
pub const IMPLIED_END_TAGS: &[Tag] = &[
    Tag::Dd,
    Tag::Dt,
    Tag::Li,
    Tag::Optgroup,
    Tag::Option,
    Tag::P,
    Tag::Rb,
    Tag::Rp,
    Tag::Rt,
    Tag::Rtc,
];

// Consts feed the compile-time rule table; the statics give callers one
// shared address per category.
pub(crate) const PHRASING_SET: TagSet = TagSet::from_tags(PHRASING_ELEMENTS);
pub(crate) const SCRIPT_SUPPORTING_SET: TagSet = TagSet::from_tags(SCRIPT_SUPPORTING);
pub(crate) const VOID_SET: TagSet = TagSet::from_tags(VOID_ELEMENTS);
pub(crate) const IMPLIED_END_TAG_SET: TagSet = TagSet::from_tags(IMPLIED_END_TAGS);

static PHRASING_CONTENT: TagSet = PHRASING_SET;
static SCRIPT_SUPPORTING_CONTENT: TagSet = SCRIPT_SUPPORTING_SET;
static VOID_CONTENT: TagSet = VOID_SET;
static IMPLIED_END_TAG_CONTENT: TagSet = IMPLIED_END_TAG_SET;

pub fn phrasing_content() -> &'static TagSet {
    &PHRASING_CONTENT
}

pub fn script_supporting() -> &'static TagSet {
    &SCRIPT_SUPPORTING_CONTENT
}

pub fn void_elements() -> &'static TagSet {
    &VOID_CONTENT
}

pub fn implied_end_tags() -> &'static TagSet {
    &IMPLIED_END_TAG_CONTENT
}

pub fn is_phrasing_content(tag_name: &str) -> bool {
    PHRASING_CONTENT.contains_name(tag_name)
}

pub fn is_void_element(tag_name: &str) -> bool {
    VOID_SET.contains_name(tag_name)
}

pub fn is_script_supporting(tag_name: &str) -> bool {
    SCRIPT_SUPPORTING_SET.contains_name(tag_name)
}

pub fn is_implied_end_tag(tag_name: &str) -> bool {
    IMPLIED_END_TAG_SET.contains_name(tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_have_no_duplicates() {
        for list in [
            PHRASING_ELEMENTS,
            SCRIPT_SUPPORTING,
            VOID_ELEMENTS,
            IMPLIED_END_TAGS,
        ] {
            assert_eq!(TagSet::from_tags(list).len(), list.len());
        }
    }

    #[test]
    fn predicates_match_enumerated_lists() {
        assert!(is_phrasing_content("span"));
        assert!(is_phrasing_content("a"));
        assert!(!is_phrasing_content("div"));
        assert!(!is_phrasing_content("p"));

        assert!(is_void_element("br"));
        assert!(is_void_element("img"));
        assert!(!is_void_element("div"));

        assert!(is_script_supporting("template"));
        assert!(!is_script_supporting("noscript"));

        assert!(is_implied_end_tag("li"));
        assert!(is_implied_end_tag("rtc"));
        assert!(!is_implied_end_tag("ul"));
    }

    #[test]
    fn predicates_do_not_fold_case() {
        assert!(!is_phrasing_content("SPAN"));
        assert!(!is_void_element("Br"));
    }

    #[test]
    fn unknown_names_belong_to_no_category() {
        for name in ["my-widget", "font", ""] {
            assert!(!is_phrasing_content(name));
            assert!(!is_void_element(name));
            assert!(!is_script_supporting(name));
            assert!(!is_implied_end_tag(name));
        }
    }

    #[test]
    fn accessors_expose_the_same_sets() {
        assert_eq!(phrasing_content().len(), PHRASING_ELEMENTS.len());
        assert_eq!(void_elements().len(), VOID_ELEMENTS.len());
        assert_eq!(script_supporting().len(), 2);
        assert_eq!(implied_end_tags().len(), IMPLIED_END_TAGS.len());
        assert!(script_supporting().iter().all(|tag| phrasing_content().contains(tag)));
    }
}
