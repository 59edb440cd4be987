//! Parsing adapter: raw fragment text to a sanitized node sequence.
//!
//! [`HtmlParser::parse`] returns exactly one outcome per call. The default
//! [`Html5everParser`] runs the html5ever tokenizer and nests elements the
//! way the source writes them, without HTML5 tree construction: a `<tr>`
//! outside a table stays a `<tr>`, text inside `<table>` stays inside it, and
//! an explicit `<html>` is an ordinary element. The resulting rcdom tree goes
//! through the tree sanitizer.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::{Attribute, LocalName, QualName, ns};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use super::errors::ParseError;
use super::node::Node;
use super::sanitize::sanitize;
use crate::config::{DEFAULT_MAX_INPUT_BYTES, ParserConfig};

/// Parsing collaborator consumed by the pipeline.
pub trait HtmlParser {
    fn parse(&self, text: &str, config: &ParserConfig) -> Result<Vec<Node>, ParseError>;
}

impl<T: HtmlParser + ?Sized> HtmlParser for &T {
    fn parse(&self, text: &str, config: &ParserConfig) -> Result<Vec<Node>, ParseError> {
        (**self).parse(text, config)
    }
}

/// html5ever-backed parser.
#[derive(Debug, Clone)]
pub struct Html5everParser {
    max_input_bytes: usize,
}

impl Default for Html5everParser {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl Html5everParser {
    #[must_use]
    pub fn new(max_input_bytes: usize) -> Self {
        Self { max_input_bytes }
    }

    /// Tokenize `text` into a document handle whose children are the
    /// fragment's top-level nodes.
    fn parse_dom(&self, text: &str, config: &ParserConfig) -> Result<Handle, ParseError> {
        if text.len() > self.max_input_bytes {
            return Err(ParseError::InputTooLarge {
                size: text.len(),
                limit: self.max_input_bytes,
            });
        }

        let opts = TokenizerOpts {
            exact_errors: config.track_source_positions,
            ..Default::default()
        };
        let tokenizer = Tokenizer::new(NestingSink::new(config.track_source_positions), opts);

        let input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(&escape_numeric_tags(text)));
        let _ = tokenizer.feed(&input);
        tokenizer.end();

        Ok(tokenizer.sink.document.clone())
    }
}

impl HtmlParser for Html5everParser {
    fn parse(&self, text: &str, config: &ParserConfig) -> Result<Vec<Node>, ParseError> {
        let document = self.parse_dom(text, config)?;
        Ok(sanitize(&[document], config))
    }
}

// ============================================================================
// Numeric tag names
// ============================================================================

/// `<333>`, `</3>`: digit-only tag names, which the tokenizer reads as text.
static NUMERIC_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([0-9]+)(\s*/?)>").expect("NUMERIC_TAG_RE: hardcoded regex is valid")
});

const NUMERIC_TAG_PREFIX: &str = "numeric-tag-";

fn escape_numeric_tags(text: &str) -> Cow<'_, str> {
    NUMERIC_TAG_RE.replace_all(text, |caps: &Captures<'_>| {
        format!("<{}{NUMERIC_TAG_PREFIX}{}{}>", &caps[1], &caps[2], &caps[3])
    })
}

fn restore_numeric_name(name: LocalName) -> LocalName {
    let restored = name
        .strip_prefix(NUMERIC_TAG_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .map(LocalName::from);
    restored.unwrap_or(name)
}

// ============================================================================
// Tree building
// ============================================================================

/// Elements that never take children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "command", "embed", "frame", "hr", "img", "input",
    "isindex", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

const FORM_TAGS: &[&str] = &[
    "input", "option", "optgroup", "select", "button", "datalist", "textarea",
];

/// Open elements that an opening `tag` closes while they are innermost.
fn implied_closes(tag: &str) -> &'static [&'static str] {
    match tag {
        "tr" => &["tr", "th", "td"],
        "th" => &["th"],
        "td" => &["thead", "th", "td"],
        "body" => &["head", "link", "script"],
        "li" => &["li"],
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => &["p"],
        "select" | "input" | "output" | "button" | "datalist" | "textarea" => FORM_TAGS,
        "option" => &["option"],
        "optgroup" => &["optgroup"],
        _ => &[],
    }
}

fn local_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Token sink that nests elements with a plain open-element stack.
///
/// An end tag closes back to the nearest open element of the same name and
/// is otherwise ignored, except that a stray `</p>` or `</br>` produces an
/// empty element of that name. Text is appended to the innermost open
/// element, merging with a preceding text node.
struct NestingSink {
    document: Handle,
    open: RefCell<Vec<Handle>>,
    track_source_positions: bool,
}

impl NestingSink {
    fn new(track_source_positions: bool) -> Self {
        Self {
            document: DomNode::new(NodeData::Document),
            open: RefCell::new(Vec::new()),
            track_source_positions,
        }
    }

    fn current(&self) -> Handle {
        self.open
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| self.document.clone())
    }

    fn append(&self, child: Handle) {
        let parent = self.current();
        child.parent.set(Some(Rc::downgrade(&parent)));
        parent.children.borrow_mut().push(child);
    }

    fn append_text(&self, text: &str) {
        let parent = self.current();
        if let Some(last) = parent.children.borrow().last()
            && let NodeData::Text { ref contents } = last.data
        {
            contents.borrow_mut().push_slice(text);
            return;
        }
        self.append(DomNode::new(NodeData::Text {
            contents: RefCell::new(StrTendril::from_slice(text)),
        }));
    }

    fn element(name: LocalName, attrs: Vec<Attribute>) -> Handle {
        DomNode::new(NodeData::Element {
            name: QualName::new(None, ns!(html), name),
            attrs: RefCell::new(attrs),
            template_contents: RefCell::new(None),
            mathml_annotation_xml_integration_point: false,
        })
    }

    fn open_tag(&self, tag: Tag) -> TokenSinkResult<Handle> {
        let name = restore_numeric_name(tag.name);

        let closes = implied_closes(&name);
        if !closes.is_empty() {
            let mut open = self.open.borrow_mut();
            while open
                .last()
                .and_then(local_name)
                .is_some_and(|top| closes.contains(&top))
            {
                open.pop();
            }
        }

        let element = Self::element(name.clone(), tag.attrs);
        self.append(element.clone());
        // The self-closing flag is ignored: `<p/>` opens a paragraph
        if VOID_ELEMENTS.contains(&&*name) {
            return TokenSinkResult::Continue;
        }
        self.open.borrow_mut().push(element);

        match &*name {
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" => TokenSinkResult::RawData(RawKind::Rawtext),
            _ => TokenSinkResult::Continue,
        }
    }

    fn close_tag(&self, tag: Tag) {
        let name = restore_numeric_name(tag.name);

        if VOID_ELEMENTS.contains(&&*name) {
            if &*name == "br" {
                self.append(Self::element(name, Vec::new()));
            }
            return;
        }

        let position = self
            .open
            .borrow()
            .iter()
            .rposition(|open| local_name(open) == Some(&*name));
        match position {
            Some(index) => self.open.borrow_mut().truncate(index),
            None if &*name == "p" => self.append(Self::element(name, Vec::new())),
            None => {}
        }
    }
}

impl TokenSink for NestingSink {
    type Handle = Handle;

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<Handle> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.open_tag(tag),
                TagKind::EndTag => self.close_tag(tag),
            },
            Token::CharacterTokens(text) => self.append_text(&text),
            Token::NullCharacterToken => self.append_text("\0"),
            Token::CommentToken(contents) => {
                self.append(DomNode::new(NodeData::Comment { contents }));
            }
            Token::DoctypeToken(doctype) => self.append(DomNode::new(NodeData::Doctype {
                name: doctype.name.unwrap_or_default(),
                public_id: doctype.public_id.unwrap_or_default(),
                system_id: doctype.system_id.unwrap_or_default(),
            })),
            Token::ParseError(error) => {
                if self.track_source_positions {
                    log::debug!("Recovered HTML parse error at line {line_number}: {error}");
                } else {
                    log::debug!("Recovered HTML parse error: {error}");
                }
            }
            Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}
