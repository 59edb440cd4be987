//! Owned node model produced by the tree sanitizer.
//!
//! Every node is owned by exactly one parent (or by the top-level sequence).
//! Nothing points back up the tree, so nodes clone, compare, and serialize
//! without cycles.

use serde::Serialize;
use std::collections::BTreeMap;

/// One node of a sanitized fragment tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { content: String },
    /// `<!-- ... -->`
    Comment,
    /// Doctypes and processing instructions.
    Directive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Lower-cased local name, as reported by the parser.
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Node {
    /// Build an element node. Test and caller convenience.
    pub fn element(
        tag_name: impl Into<String>,
        attributes: impl IntoIterator<Item = (String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element(Element {
            tag_name: tag_name.into(),
            attributes: attributes.into_iter().collect(),
            children,
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Serialized form used in warnings. Falls back to `Debug` output if
    /// serialization fails.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

impl Element {
    /// Attribute value by name, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
