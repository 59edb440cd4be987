//! Tree sanitizer: rcdom handles in, owned [`Node`] trees out.
//!
//! An rcdom node keeps a `Weak` back-reference to its parent, and siblings
//! are reachable through that parent. Sanitizing clears each parent link in
//! place and copies the tree into [`Node`]s owned strictly top-down.

use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::node::{Element, Node};
use crate::config::ParserConfig;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN_RE: hardcoded regex is valid"));

/// Clear the parent back-reference of every handle in the subtree.
///
/// Idempotent: a second call finds nothing left to clear.
pub fn detach_parents(handles: &[Handle]) {
    for handle in handles {
        drop(handle.parent.take());
        detach_parents(&handle.children.borrow());
    }
}

/// Detach `handles` and convert them into owned nodes, in document order.
///
/// Document handles contribute their children rather than themselves.
#[must_use]
pub fn sanitize(handles: &[Handle], config: &ParserConfig) -> Vec<Node> {
    detach_parents(handles);

    let mut nodes = Vec::with_capacity(handles.len());
    for handle in handles {
        push_owned(handle, config, &mut nodes);
    }
    nodes
}

fn push_owned(handle: &Handle, config: &ParserConfig, out: &mut Vec<Node>) {
    match handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                push_owned(child, config, out);
            }
        }

        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let attributes: BTreeMap<String, String> = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();

            let mut children = Vec::new();
            for child in handle.children.borrow().iter() {
                push_owned(child, config, &mut children);
            }

            out.push(Node::Element(Element {
                tag_name: name.local.to_string(),
                attributes,
                children,
            }));
        }

        NodeData::Text { ref contents } => {
            let borrowed = contents.borrow();
            let text: &str = borrowed.as_ref();
            let content = if config.normalize_whitespace {
                WHITESPACE_RUN_RE.replace_all(text, " ").into_owned()
            } else {
                text.to_string()
            };
            out.push(Node::Text { content });
        }

        NodeData::Comment { .. } => out.push(Node::Comment),

        NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            out.push(Node::Directive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::RcDom;

    fn parse(html: &str) -> RcDom {
        parse_document(RcDom::default(), Default::default()).one(html)
    }

    fn has_parent_links(handle: &Handle) -> bool {
        let parent = handle.parent.take();
        let linked = parent.is_some();
        handle.parent.set(parent);
        linked
            || handle
                .children
                .borrow()
                .iter()
                .any(has_parent_links)
    }

    #[test]
    fn test_clears_parent_links() {
        let dom = parse("<p>Hi <b>there</b></p>");
        let roots = vec![dom.document.clone()];
        assert!(has_parent_links(&dom.document));

        let _ = sanitize(&roots, &ParserConfig::default());
        assert!(!has_parent_links(&dom.document));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let dom = parse("<div><a href='../1/'>x</a><!-- note --></div>");
        let roots = vec![dom.document.clone()];
        let first = sanitize(&roots, &ParserConfig::default());
        let second = sanitize(&roots, &ParserConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_owned_tree_shape() {
        let dom = parse("<p class=\"x\">Hi<!-- c --></p>");
        let nodes = sanitize(&[dom.document.clone()], &ParserConfig::default());

        // document -> html -> [head, body]
        let html = nodes[0].as_element().expect("html element");
        assert_eq!(html.tag_name, "html");
        let body = html.children[1].as_element().expect("body element");
        let p = body.children[0].as_element().expect("p element");
        assert_eq!(p.attr("class"), Some("x"));
        assert_eq!(p.children, vec![Node::text("Hi"), Node::Comment]);
    }

    #[test]
    fn test_normalize_whitespace_collapses_text() {
        let dom = parse("<p>a  \n\n b</p>");
        let config = ParserConfig {
            normalize_whitespace: true,
            ..ParserConfig::default()
        };
        let nodes = sanitize(&[dom.document.clone()], &config);
        let html = nodes[0].as_element().expect("html element");
        let body = html.children[1].as_element().expect("body element");
        let p = body.children[0].as_element().expect("p element");
        assert_eq!(p.children, vec![Node::text("a b")]);
    }
}
