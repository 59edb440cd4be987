//! Tag classification table.
//!
//! Every tag the transcoder understands appears exactly once in [`TAG_TABLE`].
//! Anything else is [`TagCategory::Unknown`].

use std::collections::HashMap;
use std::sync::LazyLock;

/// How the transcoder treats an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    /// `<a>`: rendered as a link, plain text, or nothing.
    Anchor,
    /// Wrapped in one `<p>`.
    Block,
    /// Wrapper discarded, content kept.
    Inline,
    OrderedList,
    UnorderedList,
    /// `<li>` with its content flattened.
    ListItem,
    /// `<img>` with only `src` and `alt`.
    Image,
    /// Replaced by the removed-content placeholder; children never visited.
    ForcedRemoval,
    LineBreak,
    /// Dropped with its whole subtree.
    SilentRemoval,
    Unknown,
}

pub const TAG_TABLE: &[(&str, TagCategory)] = &[
    ("a", TagCategory::Anchor),
    // Block
    ("p", TagCategory::Block),
    ("h1", TagCategory::Block),
    ("h2", TagCategory::Block),
    ("h3", TagCategory::Block),
    ("h4", TagCategory::Block),
    ("h5", TagCategory::Block),
    ("h6", TagCategory::Block),
    ("dd", TagCategory::Block),
    ("div", TagCategory::Block),
    ("pre", TagCategory::Block),
    ("label", TagCategory::Block),
    ("blockquote", TagCategory::Block),
    // Inline. "3" and "333" come from one known post.
    ("3", TagCategory::Inline),
    ("333", TagCategory::Inline),
    ("i", TagCategory::Inline),
    ("u", TagCategory::Inline),
    ("b", TagCategory::Inline),
    ("s", TagCategory::Inline),
    ("em", TagCategory::Inline),
    ("dt", TagCategory::Inline),
    ("dl", TagCategory::Inline),
    ("tt", TagCategory::Inline),
    ("del", TagCategory::Inline),
    ("sup", TagCategory::Inline),
    ("sub", TagCategory::Inline),
    ("span", TagCategory::Inline),
    ("abbr", TagCategory::Inline),
    ("cite", TagCategory::Inline),
    ("font", TagCategory::Inline),
    ("name", TagCategory::Inline),
    ("small", TagCategory::Inline),
    ("center", TagCategory::Inline),
    ("strong", TagCategory::Inline),
    ("strike", TagCategory::Inline),
    ("address", TagCategory::Inline),
    // Lists
    ("ol", TagCategory::OrderedList),
    ("ul", TagCategory::UnorderedList),
    ("li", TagCategory::ListItem),
    ("img", TagCategory::Image),
    // Forcefully removed
    ("tr", TagCategory::ForcedRemoval),
    ("word", TagCategory::ForcedRemoval),
    ("form", TagCategory::ForcedRemoval),
    ("table", TagCategory::ForcedRemoval),
    ("iframe", TagCategory::ForcedRemoval),
    ("edited", TagCategory::ForcedRemoval),
    ("insert", TagCategory::ForcedRemoval),
    ("fieldset", TagCategory::ForcedRemoval),
    ("br", TagCategory::LineBreak),
    // Silently removed
    ("hr", TagCategory::SilentRemoval),
    ("var", TagCategory::SilentRemoval),
    ("html", TagCategory::SilentRemoval),
    ("embed", TagCategory::SilentRemoval),
    ("input", TagCategory::SilentRemoval),
    ("button", TagCategory::SilentRemoval),
    ("select", TagCategory::SilentRemoval),
    ("option", TagCategory::SilentRemoval),
    ("script", TagCategory::SilentRemoval),
    ("script1", TagCategory::SilentRemoval),
    ("checkbox", TagCategory::SilentRemoval),
    ("textarea", TagCategory::SilentRemoval),
];

static TAG_INDEX: LazyLock<HashMap<&'static str, TagCategory>> =
    LazyLock::new(|| TAG_TABLE.iter().copied().collect());

impl TagCategory {
    /// Classify a tag name. Lookup is exact; the parser already lower-cases.
    #[must_use]
    pub fn of(tag_name: &str) -> Self {
        TAG_INDEX
            .get(tag_name)
            .copied()
            .unwrap_or(TagCategory::Unknown)
    }
}
