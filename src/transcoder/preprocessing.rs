//! Raw-string repair applied before parsing.
//!
//! Legacy bodies were exported with doubled attribute quotes, escaped control
//! sequences written out literally, and entity-encoded paragraph tags inside
//! text. Each fix is a separate pass, applied in a fixed order.

use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// Regex Patterns
// ============================================================================

/// `=""` opening a doubled-quote attribute value
static DOUBLED_QUOTE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"=""#).expect("DOUBLED_QUOTE_OPEN_RE: hardcoded regex is valid"));

/// `"">` closing a doubled-quote attribute value at the end of a tag
static DOUBLED_QUOTE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""">"#).expect("DOUBLED_QUOTE_CLOSE_RE: hardcoded regex is valid"));

/// Literal backslash-r (two characters, not a carriage return)
static ESCAPED_CR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\r").expect("ESCAPED_CR_RE: hardcoded regex is valid"));

/// Literal backslash-t (two characters, not a tab)
static ESCAPED_TAB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\t").expect("ESCAPED_TAB_RE: hardcoded regex is valid"));

static NBSP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&nbsp;").expect("NBSP_RE: hardcoded regex is valid"));

/// `&lt;p&gt;` and `&lt;/p&gt;` left in text
static ENCODED_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&lt;/?p&gt;").expect("ENCODED_PARAGRAPH_RE: hardcoded regex is valid")
});

// ============================================================================
// Known-bad inputs
// ============================================================================

/// Literal patches for individual posts whose ASCII arrows parse as tags.
/// Each replaces the first occurrence only.
const LITERAL_PATCHES: &[(&str, &str)] = &[
    (
        "<-------------------------------this",
        "|-------------------------------this",
    ),
    (
        "much--------------------------------------------->",
        "much---------------------------------------------|",
    ),
];

/// Turn `href=""x"">` into `href=\"x\">` so the parser keeps the value in
/// one attribute. The link canonicalizer later strips the `\"` artifacts.
#[must_use]
pub fn repair_doubled_quotes(input: &str) -> String {
    let opened = DOUBLED_QUOTE_OPEN_RE.replace_all(input, r#"=\""#);
    DOUBLED_QUOTE_CLOSE_RE
        .replace_all(&opened, r#"\">"#)
        .into_owned()
}

/// Drop literal `\r` sequences; literal `\n` sequences are kept.
#[must_use]
pub fn strip_escaped_returns(input: &str) -> String {
    ESCAPED_CR_RE.replace_all(input, "").into_owned()
}

#[must_use]
pub fn replace_nbsp(input: &str) -> String {
    NBSP_RE.replace_all(input, " ").into_owned()
}

#[must_use]
pub fn strip_escaped_tabs(input: &str) -> String {
    ESCAPED_TAB_RE.replace_all(input, "").into_owned()
}

#[must_use]
pub fn strip_encoded_paragraphs(input: &str) -> String {
    ENCODED_PARAGRAPH_RE.replace_all(input, "").into_owned()
}

#[must_use]
pub fn apply_literal_patches(input: &str) -> String {
    LITERAL_PATCHES
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replacen(from, to, 1))
}

/// Run every repair pass in order. Never fails; the input may come back
/// unchanged.
#[must_use]
pub fn repair(input: &str) -> String {
    let repaired = repair_doubled_quotes(input);
    let repaired = strip_escaped_returns(&repaired);
    let repaired = replace_nbsp(&repaired);
    let repaired = strip_escaped_tabs(&repaired);
    let repaired = strip_encoded_paragraphs(&repaired);
    apply_literal_patches(&repaired)
}
