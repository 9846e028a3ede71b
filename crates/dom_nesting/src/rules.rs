//! Per-tag content-model rules.
//!
//! The table is written as compact rule specs and normalized at compile time
//! into a `static` array indexed by `Tag`. Tags without an entry impose no
//! content-kind or forbidden-child restriction.

use crate::categories::{PHRASING_SET, SCRIPT_SUPPORTING_SET};
use crate::tags::{Tag, TagSet};

/// Which element children a tag's content model admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Any,
    PhrasingOnly,
    /// Declared for completeness; no rule uses it and it is checked like `Any`.
    Transparent,
    /// Only the listed tags; an empty set admits no element children.
    ExplicitSet(TagSet),
}

/// Normalized rule for one known tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagRule {
    pub tag: Tag,
    pub content_kind: ContentKind,
    /// Never allowed as a direct child, whatever `content_kind` says.
    pub forbidden_children: TagSet,
}

impl TagRule {
    /// Explicit children set, present only for `ContentKind::ExplicitSet`.
    pub fn allowed_children(&self) -> Option<&TagSet> {
        match &self.content_kind {
            ContentKind::ExplicitSet(set) => Some(set),
            _ => None,
        }
    }
}

/// Children spec of a rule entry before normalization.
#[derive(Clone, Copy)]
enum Children {
    Any,
    Phrasing,
    /// Text only: an explicit, empty set.
    Text,
    Tags(&'static [Tag]),
    /// `Tags` plus the script-supporting elements.
    TagsAndScripts(&'static [Tag]),
    Ruby,
    Datalist,
    PhrasingOrHeading,
}

#[derive(Clone, Copy)]
struct RuleSpec {
    tag: Tag,
    children: Children,
    forbidden: &'static [Tag],
}

const fn rule(tag: Tag, children: Children) -> RuleSpec {
    RuleSpec {
        tag,
        children,
        forbidden: &[],
    }
}

const fn rule_forbidding(tag: Tag, children: Children, forbidden: &'static [Tag]) -> RuleSpec {
    RuleSpec {
        tag,
        children,
        forbidden,
    }
}

const HEADINGS: &[Tag] = &[Tag::H1, Tag::H2, Tag::H3, Tag::H4, Tag::H5, Tag::H6];

const NO_MAIN: &[Tag] = &[Tag::Main];

const NO_HEADER_FOOTER_MAIN: &[Tag] = &[Tag::Header, Tag::Footer, Tag::Main];

const NO_SECTIONING_OR_HEADINGS: &[Tag] = &[
    Tag::Header,
    Tag::Footer,
    Tag::Article,
    Tag::Aside,
    Tag::Nav,
    Tag::Section,
    Tag::H1,
    Tag::H2,
    Tag::H3,
    Tag::H4,
    Tag::H5,
    Tag::H6,
];

const NO_MEDIA: &[Tag] = &[Tag::Audio, Tag::Video];

const ROWS: &[Tag] = &[Tag::Tr];

/// Phrasing content plus ruby annotations.
const fn ruby_content() -> TagSet {
    PHRASING_SET.with(Tag::Rt).with(Tag::Rp)
}

/// Phrasing content, or options with script-supporting elements.
const fn datalist_content() -> TagSet {
    PHRASING_SET
        .with(Tag::Option)
        .union(SCRIPT_SUPPORTING_SET)
}

/// Phrasing content plus headings, for `summary` and `legend`.
const fn phrasing_or_heading() -> TagSet {
    PHRASING_SET.union(TagSet::from_tags(HEADINGS))
}

const RULE_DATA: &[RuleSpec] = &[
    // Document structure
    rule(Tag::Html, Children::Tags(&[Tag::Head, Tag::Body])),
    rule(
        Tag::Head,
        Children::Tags(&[
            Tag::Base,
            Tag::Link,
            Tag::Meta,
            Tag::Title,
            Tag::Style,
            Tag::Script,
            Tag::Noscript,
            Tag::Template,
        ]),
    ),
    rule(Tag::Body, Children::Any),
    // Sections
    rule_forbidding(Tag::Article, Children::Any, NO_MAIN),
    rule(Tag::Section, Children::Any),
    rule_forbidding(Tag::Nav, Children::Any, NO_MAIN),
    rule_forbidding(Tag::Aside, Children::Any, NO_MAIN),
    rule_forbidding(Tag::Header, Children::Any, NO_HEADER_FOOTER_MAIN),
    rule_forbidding(Tag::Footer, Children::Any, NO_HEADER_FOOTER_MAIN),
    rule_forbidding(
        Tag::Address,
        Children::Any,
        &[
            Tag::Article,
            Tag::Aside,
            Tag::Header,
            Tag::Footer,
            Tag::Nav,
            Tag::Section,
            Tag::H1,
            Tag::H2,
            Tag::H3,
            Tag::H4,
            Tag::H5,
            Tag::H6,
            Tag::Address,
        ],
    ),
    rule(Tag::Search, Children::Any),
    rule(Tag::H1, Children::Phrasing),
    rule(Tag::H2, Children::Phrasing),
    rule(Tag::H3, Children::Phrasing),
    rule(Tag::H4, Children::Phrasing),
    rule(Tag::H5, Children::Phrasing),
    rule(Tag::H6, Children::Phrasing),
    rule(
        Tag::Hgroup,
        Children::TagsAndScripts(&[
            Tag::H1,
            Tag::H2,
            Tag::H3,
            Tag::H4,
            Tag::H5,
            Tag::H6,
            Tag::P,
        ]),
    ),
    // Grouping
    rule(Tag::P, Children::Phrasing),
    rule(Tag::Div, Children::Any),
    rule(Tag::Main, Children::Any),
    rule(Tag::Blockquote, Children::Any),
    rule(Tag::Figure, Children::Any),
    rule(Tag::Figcaption, Children::Any),
    rule(Tag::Pre, Children::Phrasing),
    // Lists
    rule(Tag::Ul, Children::TagsAndScripts(&[Tag::Li])),
    rule(Tag::Ol, Children::TagsAndScripts(&[Tag::Li])),
    rule(Tag::Menu, Children::TagsAndScripts(&[Tag::Li])),
    rule(Tag::Li, Children::Any),
    rule(
        Tag::Dl,
        Children::TagsAndScripts(&[Tag::Dt, Tag::Dd, Tag::Div]),
    ),
    rule_forbidding(Tag::Dt, Children::Any, NO_SECTIONING_OR_HEADINGS),
    rule(Tag::Dd, Children::Any),
    // Tables
    rule(
        Tag::Table,
        Children::TagsAndScripts(&[
            Tag::Caption,
            Tag::Colgroup,
            Tag::Thead,
            Tag::Tbody,
            Tag::Tfoot,
            Tag::Tr,
        ]),
    ),
    rule_forbidding(Tag::Caption, Children::Any, &[Tag::Table]),
    rule(Tag::Colgroup, Children::Tags(&[Tag::Col, Tag::Template])),
    rule(Tag::Thead, Children::TagsAndScripts(ROWS)),
    rule(Tag::Tbody, Children::TagsAndScripts(ROWS)),
    rule(Tag::Tfoot, Children::TagsAndScripts(ROWS)),
    rule(Tag::Tr, Children::TagsAndScripts(&[Tag::Th, Tag::Td])),
    rule_forbidding(Tag::Th, Children::Any, NO_SECTIONING_OR_HEADINGS),
    rule_forbidding(Tag::Td, Children::Any, NO_SECTIONING_OR_HEADINGS),
    // Forms
    rule_forbidding(Tag::Form, Children::Any, &[Tag::Form]),
    rule(Tag::Fieldset, Children::Any),
    rule(Tag::Legend, Children::PhrasingOrHeading),
    rule_forbidding(Tag::Label, Children::Phrasing, &[Tag::Label]),
    rule_forbidding(
        Tag::Button,
        Children::Phrasing,
        &[
            Tag::A,
            Tag::Button,
            Tag::Details,
            Tag::Embed,
            Tag::Iframe,
            Tag::Input,
            Tag::Label,
            Tag::Select,
            Tag::Textarea,
        ],
    ),
    rule(
        Tag::Select,
        Children::TagsAndScripts(&[Tag::Option, Tag::Optgroup]),
    ),
    rule(Tag::Datalist, Children::Datalist),
    rule(Tag::Optgroup, Children::TagsAndScripts(&[Tag::Option])),
    rule(Tag::Option, Children::Text),
    rule(Tag::Textarea, Children::Text),
    rule(Tag::Output, Children::Phrasing),
    rule_forbidding(Tag::Progress, Children::Phrasing, &[Tag::Progress]),
    rule_forbidding(Tag::Meter, Children::Phrasing, &[Tag::Meter]),
    // Interactive
    rule(Tag::Details, Children::Any),
    rule(Tag::Summary, Children::PhrasingOrHeading),
    rule(Tag::Dialog, Children::Any),
    // Embedded; transparent models are approximated as any
    rule(
        Tag::Picture,
        Children::TagsAndScripts(&[Tag::Source, Tag::Img]),
    ),
    rule_forbidding(Tag::Video, Children::Any, NO_MEDIA),
    rule_forbidding(Tag::Audio, Children::Any, NO_MEDIA),
    rule(Tag::Canvas, Children::Any),
    rule(Tag::Map, Children::Any),
    rule(Tag::Object, Children::Any),
    rule(Tag::Iframe, Children::Text),
    // Text-level
    rule_forbidding(Tag::A, Children::Phrasing, &[Tag::A]),
    rule(Tag::Em, Children::Phrasing),
    rule(Tag::Strong, Children::Phrasing),
    rule(Tag::Small, Children::Phrasing),
    rule(Tag::S, Children::Phrasing),
    rule(Tag::Cite, Children::Phrasing),
    rule(Tag::Q, Children::Phrasing),
    rule_forbidding(Tag::Dfn, Children::Phrasing, &[Tag::Dfn]),
    rule(Tag::Abbr, Children::Phrasing),
    rule(Tag::Ruby, Children::Ruby),
    rule(Tag::Rt, Children::Phrasing),
    rule(Tag::Rp, Children::Text),
    rule(Tag::Data, Children::Phrasing),
    rule(Tag::Time, Children::Phrasing),
    rule(Tag::Code, Children::Phrasing),
    rule(Tag::Var, Children::Phrasing),
    rule(Tag::Samp, Children::Phrasing),
    rule(Tag::Kbd, Children::Phrasing),
    rule(Tag::Sub, Children::Phrasing),
    rule(Tag::Sup, Children::Phrasing),
    rule(Tag::I, Children::Phrasing),
    rule(Tag::B, Children::Phrasing),
    rule(Tag::U, Children::Phrasing),
    rule(Tag::Mark, Children::Phrasing),
    rule(Tag::Bdi, Children::Phrasing),
    rule(Tag::Bdo, Children::Phrasing),
    rule(Tag::Span, Children::Phrasing),
    // Edits
    rule(Tag::Ins, Children::Any),
    rule(Tag::Del, Children::Any),
    // Scripting
    rule(Tag::Script, Children::Text),
    rule_forbidding(Tag::Noscript, Children::Any, &[Tag::Noscript]),
    rule(Tag::Template, Children::Any),
    rule(Tag::Slot, Children::Any),
    // Void and text-only
    rule(Tag::Area, Children::Text),
    rule(Tag::Base, Children::Text),
    rule(Tag::Br, Children::Text),
    rule(Tag::Col, Children::Text),
    rule(Tag::Embed, Children::Text),
    rule(Tag::Hr, Children::Text),
    rule(Tag::Img, Children::Text),
    rule(Tag::Input, Children::Text),
    rule(Tag::Link, Children::Text),
    rule(Tag::Meta, Children::Text),
    rule(Tag::Param, Children::Text),
    rule(Tag::Source, Children::Text),
    rule(Tag::Style, Children::Text),
    rule(Tag::Title, Children::Text),
    rule(Tag::Track, Children::Text),
    rule(Tag::Wbr, Children::Text),
    // Foreign content roots are opaque
    rule(Tag::Math, Children::Any),
    rule(Tag::Svg, Children::Any),
];

const fn normalize(spec: RuleSpec) -> TagRule {
    let content_kind = match spec.children {
        Children::Any => ContentKind::Any,
        Children::Phrasing => ContentKind::PhrasingOnly,
        Children::Text => ContentKind::ExplicitSet(TagSet::EMPTY),
        Children::Tags(tags) => ContentKind::ExplicitSet(TagSet::from_tags(tags)),
        Children::TagsAndScripts(tags) => {
            ContentKind::ExplicitSet(TagSet::from_tags(tags).union(SCRIPT_SUPPORTING_SET))
        }
        Children::Ruby => ContentKind::ExplicitSet(ruby_content()),
        Children::Datalist => ContentKind::ExplicitSet(datalist_content()),
        Children::PhrasingOrHeading => ContentKind::ExplicitSet(phrasing_or_heading()),
    };
    TagRule {
        tag: spec.tag,
        content_kind,
        forbidden_children: TagSet::from_tags(spec.forbidden),
    }
}

const fn build_rules() -> [Option<TagRule>; Tag::COUNT] {
    let mut rules: [Option<TagRule>; Tag::COUNT] = [None; Tag::COUNT];
    let mut i = 0;
    while i < RULE_DATA.len() {
        let spec = RULE_DATA[i];
        let index = spec.tag.index();
        if rules[index].is_some() {
            panic!("duplicate tag in nesting rule table");
        }
        rules[index] = Some(normalize(spec));
        i += 1;
    }
    rules
}

static RULES: [Option<TagRule>; Tag::COUNT] = build_rules();

pub fn rule_for(tag: Tag) -> Option<&'static TagRule> {
    RULES[tag.index()].as_ref()
}

pub fn rule_for_name(tag_name: &str) -> Option<&'static TagRule> {
    Tag::from_name(tag_name).and_then(rule_for)
}

/// All rules, in `Tag` declaration order.
pub fn rules() -> impl Iterator<Item = &'static TagRule> {
    RULES.iter().flatten()
}
