//! Tag transcoder: sanitized node trees to the restricted output vocabulary.
//!
//! Dispatch is a single `match` over [`TagCategory`]. Output fragments are
//! appended to one buffer in document order with no separator.
//!
//! Recursion depth follows the input's nesting depth. There is no guard
//! against pathologically deep input.

use super::link_canonicalizer::canonicalize_href_with_base;
use super::logger::ConversionLogger;
use super::node::{Element, Node};
use super::tag_table::TagCategory;
use crate::config::ConversionOptions;

pub struct TagTranscoder<'a, L> {
    options: &'a ConversionOptions,
    logger: L,
}

impl<'a, L: ConversionLogger> TagTranscoder<'a, L> {
    pub fn new(options: &'a ConversionOptions, logger: L) -> Self {
        Self { options, logger }
    }

    /// Transcode a node sequence. Never fails; unsupported nodes contribute
    /// nothing and are reported through the logger.
    #[must_use]
    pub fn transcode(&self, nodes: &[Node]) -> String {
        let mut buffer = String::new();
        self.walk_children(nodes, &mut buffer);
        buffer
    }

    fn walk_children(&self, nodes: &[Node], buffer: &mut String) {
        for node in nodes {
            self.walk_node(node, buffer);
        }
    }

    fn walk_node(&self, node: &Node, buffer: &mut String) {
        let element = match node {
            Node::Element(element) => element,
            Node::Text { content } => {
                buffer.push_str(content);
                return;
            }
            Node::Comment | Node::Directive => return,
        };

        match TagCategory::of(&element.tag_name) {
            TagCategory::Anchor => self.write_anchor(element, buffer),

            TagCategory::Block => {
                buffer.push_str("<p>");
                self.walk_children(&element.children, buffer);
                buffer.push_str("</p>");
            }

            TagCategory::Inline => {
                if let Some(text) = self.plain_text(element) {
                    buffer.push_str(&text);
                }
            }

            TagCategory::OrderedList => {
                buffer.push_str("<ol>");
                self.walk_children(&element.children, buffer);
                buffer.push_str("</ol>");
            }

            TagCategory::UnorderedList => {
                buffer.push_str("<ul>");
                self.walk_children(&element.children, buffer);
                buffer.push_str("</ul>");
            }

            TagCategory::ListItem => {
                buffer.push_str("<li>");
                match self.plain_text(element) {
                    Some(text) => buffer.push_str(&text),
                    None => buffer.push_str(&self.options.missing_attribute_literal),
                }
                buffer.push_str("</li>");
            }

            TagCategory::Image => self.write_image(element, buffer),

            TagCategory::ForcedRemoval => buffer.push_str(&self.options.removed_placeholder),

            TagCategory::LineBreak => buffer.push_str("<br />"),

            TagCategory::SilentRemoval => {}

            TagCategory::Unknown => {
                self.logger.warn("Uncaught tag", &node.to_json());
            }
        }
    }

    /// Flattened content of an element: its children transcoded with the
    /// full table, or `None` for a childless element.
    ///
    /// Block and list descendants still emit their wrappers; only the
    /// element's own wrapper is dropped.
    fn plain_text(&self, element: &Element) -> Option<String> {
        // Elements hold no text of their own, only through text children
        if element.children.is_empty() {
            return None;
        }
        Some(self.transcode(&element.children))
    }

    fn write_anchor(&self, element: &Element, buffer: &mut String) {
        // Anchors often wrap <strong>/<span>; those render as plain text
        let Some(text) = self.plain_text(element) else {
            return;
        };
        if text.trim().is_empty() {
            return;
        }

        match element.attr("href") {
            Some(href) if !href.trim().is_empty() => {
                let link = canonicalize_href_with_base(href, &self.options.link_base);
                buffer.push_str("<a href=\"");
                buffer.push_str(&link);
                buffer.push_str("\">");
                buffer.push_str(&text);
                buffer.push_str("</a>");
            }
            _ => buffer.push_str(&text),
        }
    }

    /// `src` and `alt` are copied verbatim; a missing one is written as the
    /// missing-value literal.
    fn write_image(&self, element: &Element, buffer: &mut String) {
        let missing = self.options.missing_attribute_literal.as_str();
        let src = element.attr("src").unwrap_or(missing);
        let alt = element.attr("alt").unwrap_or(missing);

        buffer.push_str("<img src=\"");
        buffer.push_str(src);
        buffer.push_str("\" alt=\"");
        buffer.push_str(alt);
        buffer.push_str("\" />");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcoder::logger::MemoryLogger;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn el(tag: &str, pairs: &[(&str, &str)], children: Vec<Node>) -> Node {
        Node::element(tag, attrs(pairs), children)
    }

    fn run(nodes: &[Node]) -> (String, MemoryLogger) {
        let options = ConversionOptions::default();
        let logger = MemoryLogger::new();
        let output = TagTranscoder::new(&options, &logger).transcode(nodes);
        (output, logger)
    }

    #[test]
    fn test_block_tags_wrap_in_paragraph() {
        let (output, _) = run(&[
            el("h2", &[], vec![Node::text("Talk to me")]),
            el("blockquote", &[], vec![Node::text("quoted")]),
            el("div", &[], vec![]),
        ]);
        assert_eq!(output, "<p>Talk to me</p><p>quoted</p><p></p>");
    }

    #[test]
    fn test_inline_tags_drop_wrapper() {
        let (output, _) = run(&[el(
            "span",
            &[("style", "font-size: 12pt")],
            vec![
                Node::text("Dear "),
                el("strong", &[], vec![Node::text("Anonymous")]),
                el("em", &[], vec![]),
            ],
        )]);
        assert_eq!(output, "Dear Anonymous");
    }

    #[test]
    fn test_anchor_with_relative_href() {
        let (output, _) = run(&[el(
            "a",
            &[("href", r#"\"../159836/\""#)],
            vec![el("strong", &[], vec![Node::text("Escalation GTA")])],
        )]);
        assert_eq!(
            output,
            r#"<a href="https://www.bigwhitewall.com/talkabouts/thread/159836/">Escalation GTA</a>"#
        );
    }

    #[test]
    fn test_anchor_without_href_renders_text() {
        let (missing, _) = run(&[el("a", &[], vec![Node::text("name")])]);
        assert_eq!(missing, "name");
        let (blank, _) = run(&[el("a", &[("href", "  ")], vec![Node::text("name")])]);
        assert_eq!(blank, "name");
    }

    #[test]
    fn test_anchor_without_text_is_dropped() {
        let (childless, _) = run(&[el("a", &[("href", "../1/")], vec![])]);
        assert_eq!(childless, "");
        let (blank, _) = run(&[el("a", &[("href", "../1/")], vec![Node::text("  ")])]);
        assert_eq!(blank, "");
    }

    #[test]
    fn test_lists() {
        let (output, _) = run(&[el(
            "ul",
            &[],
            vec![
                el("li", &[], vec![Node::text("one")]),
                el("li", &[], vec![el("p", &[], vec![Node::text("two")])]),
                el("li", &[], vec![]),
            ],
        )]);
        assert_eq!(
            output,
            "<ul><li>one</li><li><p>two</p></li><li>undefined</li></ul>"
        );

        let (ordered, _) = run(&[el("ol", &[], vec![el("li", &[], vec![Node::text("x")])])]);
        assert_eq!(ordered, "<ol><li>x</li></ol>");
    }

    #[test]
    fn test_image_keeps_only_src_and_alt() {
        let (output, _) = run(&[el(
            "img",
            &[("src", "a.png"), ("alt", "A"), ("width", "10")],
            vec![],
        )]);
        assert_eq!(output, r#"<img src="a.png" alt="A" />"#);

        let (missing, _) = run(&[el("img", &[("src", "a.png")], vec![])]);
        assert_eq!(missing, r#"<img src="a.png" alt="undefined" />"#);
    }

    #[test]
    fn test_forced_removal_ignores_children() {
        let (output, logger) = run(&[el(
            "table",
            &[],
            vec![el("foo", &[], vec![Node::text("cell")])],
        )]);
        assert_eq!(output, "\n<p>[REMOVED]</p>\n");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_silent_removal_discards_subtree() {
        let (output, logger) = run(&[
            el("script", &[], vec![Node::text("alert(1)")]),
            el("button", &[], vec![el("table", &[], vec![])]),
            el("hr", &[], vec![]),
        ]);
        assert_eq!(output, "");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_line_break_comment_directive() {
        let (output, _) = run(&[
            Node::text("a"),
            el("br", &[], vec![]),
            Node::Comment,
            Node::Directive,
            Node::text("b"),
        ]);
        assert_eq!(output, "a<br />b");
    }

    #[test]
    fn test_unknown_tag_warns_with_serialized_node() {
        let (output, logger) = run(&[el("foo", &[], vec![Node::text("bar")])]);
        assert_eq!(output, "");

        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Uncaught tag");
        assert!(warnings[0].context.contains(r#""tag_name":"foo""#));
        assert!(warnings[0].context.contains("bar"));
    }

    #[test]
    fn test_text_is_not_escaped() {
        let (output, _) = run(&[Node::text("5 < 10 & \"quoted\"")]);
        assert_eq!(output, "5 < 10 & \"quoted\"");
    }

    #[test]
    fn test_custom_placeholder_and_base() {
        let options = ConversionOptions::builder()
            .removed_placeholder("[gone]")
            .link_base("https://archive.test/t")
            .build()
            .expect("valid options");
        let logger = MemoryLogger::new();
        let output = TagTranscoder::new(&options, &logger).transcode(&[
            el("form", &[], vec![]),
            el("a", &[("href", "../7/")], vec![Node::text("seven")]),
        ]);
        assert_eq!(output, r#"[gone]<a href="https://archive.test/t/7/">seven</a>"#);
    }
}
