//! Closed enumeration of the HTML tag names known to the nesting tables.
//!
//! Names outside the enumeration are not an error: `Tag::from_name` returns
//! `None` and callers fall back to context-only checks.

use std::fmt;
use std::str::FromStr;

macro_rules! enumerate_tags {
    ($(
        $variant:ident => $name:literal
    ),* $(,)?) => {
        /// Known HTML tag.
        ///
        /// Discriminants are dense and follow declaration order; `TagSet` relies
        /// on this to address one bit per tag.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Tag {
            $($variant),*
        }

        impl Tag {
            /// Every known tag, in declaration order.
            pub const ALL: &'static [Tag] = &[$(Tag::$variant),*];

            pub const COUNT: usize = Tag::ALL.len();

            /// Canonical lower-case tag name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name),*
                }
            }

            /// Exact, case-sensitive lookup. The caller normalizes case.
            pub fn from_name(name: &str) -> Option<Tag> {
                match name {
                    $($name => Some(Tag::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

enumerate_tags! {
    // Document structure and metadata
    Html => "html",
    Head => "head",
    Body => "body",
    Base => "base",
    Link => "link",
    Meta => "meta",
    Title => "title",
    Style => "style",
    // Sections
    Article => "article",
    Section => "section",
    Nav => "nav",
    Aside => "aside",
    Header => "header",
    Footer => "footer",
    Address => "address",
    Search => "search",
    Hgroup => "hgroup",
    H1 => "h1",
    H2 => "h2",
    H3 => "h3",
    H4 => "h4",
    H5 => "h5",
    H6 => "h6",
    // Grouping
    P => "p",
    Hr => "hr",
    Pre => "pre",
    Blockquote => "blockquote",
    Ol => "ol",
    Ul => "ul",
    Menu => "menu",
    Li => "li",
    Dl => "dl",
    Dt => "dt",
    Dd => "dd",
    Figure => "figure",
    Figcaption => "figcaption",
    Main => "main",
    Div => "div",
    // Text-level
    A => "a",
    Em => "em",
    Strong => "strong",
    Small => "small",
    S => "s",
    Cite => "cite",
    Q => "q",
    Dfn => "dfn",
    Abbr => "abbr",
    Ruby => "ruby",
    Rt => "rt",
    Rp => "rp",
    Rb => "rb",
    Rtc => "rtc",
    Data => "data",
    Time => "time",
    Code => "code",
    Var => "var",
    Samp => "samp",
    Kbd => "kbd",
    Sub => "sub",
    Sup => "sup",
    I => "i",
    B => "b",
    U => "u",
    Mark => "mark",
    Bdi => "bdi",
    Bdo => "bdo",
    Span => "span",
    Br => "br",
    Wbr => "wbr",
    // Edits
    Ins => "ins",
    Del => "del",
    // Embedded
    Picture => "picture",
    Source => "source",
    Img => "img",
    Iframe => "iframe",
    Embed => "embed",
    Object => "object",
    Param => "param",
    Video => "video",
    Audio => "audio",
    Track => "track",
    Map => "map",
    Area => "area",
    Math => "math",
    Svg => "svg",
    // Tabular data
    Table => "table",
    Caption => "caption",
    Colgroup => "colgroup",
    Col => "col",
    Tbody => "tbody",
    Thead => "thead",
    Tfoot => "tfoot",
    Tr => "tr",
    Td => "td",
    Th => "th",
    // Forms
    Form => "form",
    Label => "label",
    Input => "input",
    Button => "button",
    Select => "select",
    Datalist => "datalist",
    Optgroup => "optgroup",
    Option => "option",
    Textarea => "textarea",
    Output => "output",
    Progress => "progress",
    Meter => "meter",
    Fieldset => "fieldset",
    Legend => "legend",
    // Interactive
    Details => "details",
    Summary => "summary",
    Dialog => "dialog",
    // Scripting
    Script => "script",
    Noscript => "noscript",
    Template => "template",
    Slot => "slot",
    Canvas => "canvas",
}

impl Tag {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `Tag::from_str` for names outside the enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTag;

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown HTML tag name")
    }
}

impl std::error::Error for UnknownTag {}

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::from_name(s).ok_or(UnknownTag)
    }
}

const WORDS: usize = Tag::COUNT.div_ceil(64);

/// Immutable set of known tags, one bit per `Tag`.
///
/// All constructors are `const` so category sets and rule tables can be
/// evaluated at compile time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagSet {
    words: [u64; WORDS],
}

impl TagSet {
    pub const EMPTY: TagSet = TagSet { words: [0; WORDS] };

    pub const fn from_tags(tags: &[Tag]) -> TagSet {
        let mut set = TagSet::EMPTY;
        let mut i = 0;
        while i < tags.len() {
            set = set.with(tags[i]);
            i += 1;
        }
        set
    }

    pub const fn with(self, tag: Tag) -> TagSet {
        let mut words = self.words;
        let index = tag.index();
        words[index / 64] |= 1 << (index % 64);
        TagSet { words }
    }

    pub const fn union(self, other: TagSet) -> TagSet {
        let mut words = self.words;
        let mut i = 0;
        while i < WORDS {
            words[i] |= other.words[i];
            i += 1;
        }
        TagSet { words }
    }

    pub const fn contains(&self, tag: Tag) -> bool {
        let index = tag.index();
        self.words[index / 64] & (1 << (index % 64)) != 0
    }

    /// Membership by name; names outside `Tag` are never members.
    pub fn contains_name(&self, name: &str) -> bool {
        Tag::from_name(name).is_some_and(|tag| self.contains(tag))
    }

    pub const fn len(&self) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < WORDS {
            count += self.words[i].count_ones() as usize;
            i += 1;
        }
        count
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        Tag::ALL.iter().copied().filter(|tag| self.contains(*tag))
    }
}

impl Default for TagSet {
    fn default() -> Self {
        TagSet::EMPTY
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Tag::as_str)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Tag, TagSet};

    #[test]
    fn names_round_trip_through_lookup() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.as_str()), Some(*tag), "{tag}");
        }
        assert_eq!(Tag::COUNT, Tag::ALL.len());
    }

    #[test]
    fn discriminants_are_dense() {
        for (expected, tag) in Tag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), expected);
        }
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(Tag::from_name("DIV"), None);
        assert_eq!(Tag::from_name(" div"), None);
        assert_eq!(Tag::from_name("my-widget"), None);
        assert_eq!(Tag::from_name(""), None);
        assert_eq!("span".parse::<Tag>(), Ok(Tag::Span));
        assert!("Span".parse::<Tag>().is_err());
    }

    #[test]
    fn tag_set_membership_and_counts() {
        let set = TagSet::from_tags(&[Tag::Li, Tag::Script, Tag::Template, Tag::Li]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(Tag::Li));
        assert!(set.contains_name("template"));
        assert!(!set.contains(Tag::Div));
        assert!(!set.contains_name("custom-element"));
        assert!(TagSet::EMPTY.is_empty());

        let both = set.union(TagSet::from_tags(&[Tag::Div]));
        assert_eq!(both.len(), 4);
        // Iteration follows declaration order, not insertion order.
        assert_eq!(
            both.iter().collect::<Vec<_>>(),
            vec![Tag::Li, Tag::Div, Tag::Script, Tag::Template]
        );
    }

    #[test]
    fn last_tag_fits_in_set() {
        let last = *Tag::ALL.last().expect("at least one tag");
        let set = TagSet::EMPTY.with(last);
        assert!(set.contains(last));
        assert_eq!(set.len(), 1);
    }
}
