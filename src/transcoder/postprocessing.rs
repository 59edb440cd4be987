//! Output normalization: ordered string rewrites over the transcoded body.
//!
//! The steps run once, in the order [`normalize`] lists them. Later steps
//! match artifacts earlier ones leave behind (line breaks created from
//! newlines, paragraphs split apart by the nesting collapses), so they must
//! not be reordered or merged.
//!
//! Steps 2 and 3 work on matched `<p>`/`</p>` pairs rather than raw tag
//! runs, so every paragraph tag they remove leaves its partner balanced.

use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;

// ============================================================================
// Regex Patterns
// ============================================================================

static PARAGRAPH_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?p>").expect("PARAGRAPH_TAG_RE: hardcoded regex is valid"));

/// Text that the break and whitespace steps later delete when it sits
/// between two closing tags.
static BREAK_GAP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?: |\n|<br />)*$").expect("BREAK_GAP_RE: hardcoded regex is valid")
});

static EMPTY_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" *<p> *</p> *").expect("EMPTY_PARAGRAPH_RE: hardcoded regex is valid")
});

static BREAKS_AFTER_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" *</p>(?:<br />)+ *")
        .expect("BREAKS_AFTER_CLOSE_RE: hardcoded regex is valid")
});

/// Literal `<\p>`; kept in sequence although generated markup never has it
static BREAKS_BEFORE_ESCAPED_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" *(?:<br />)+ *<\\p> *")
        .expect("BREAKS_BEFORE_ESCAPED_OPEN_RE: hardcoded regex is valid")
});

static BREAKS_BEFORE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" *(?:<br />)+ *</p> *")
        .expect("BREAKS_BEFORE_CLOSE_RE: hardcoded regex is valid")
});

static BREAK_BETWEEN_PARAGRAPHS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" *</p> *<br /> *<p> *")
        .expect("BREAK_BETWEEN_PARAGRAPHS_RE: hardcoded regex is valid")
});

static SPACE_BETWEEN_PARAGRAPHS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" *</p> *<p> *").expect("SPACE_BETWEEN_PARAGRAPHS_RE: hardcoded regex is valid")
});

// ============================================================================
// Paragraph Tree
// ============================================================================

/// The body split at matched paragraph tags. Unmatched tags stay in text.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Paragraph(Vec<Segment>),
}

impl Segment {
    fn is_blank(&self) -> bool {
        matches!(self, Segment::Text(text) if text.bytes().all(|b| b == b' '))
    }

    fn is_break_gap(&self) -> bool {
        matches!(self, Segment::Text(text) if BREAK_GAP_RE.is_match(text))
    }
}

fn parse_segments(html: &str) -> Vec<Segment> {
    let tags: Vec<_> = PARAGRAPH_TAG_RE.find_iter(html).collect();

    // Pair each closing tag with the nearest unpaired opening tag
    let mut paired = vec![false; tags.len()];
    let mut pending = Vec::new();
    for (index, tag) in tags.iter().enumerate() {
        if tag.as_str() == "<p>" {
            pending.push(index);
        } else if let Some(opening) = pending.pop() {
            paired[opening] = true;
            paired[index] = true;
        }
    }

    let mut parents: Vec<Vec<Segment>> = Vec::new();
    let mut current = Vec::new();
    let mut text = String::new();
    let mut cursor = 0;

    for (tag, is_paired) in tags.iter().zip(paired) {
        text.push_str(&html[cursor..tag.start()]);
        cursor = tag.end();
        if !is_paired {
            text.push_str(tag.as_str());
            continue;
        }
        if !text.is_empty() {
            current.push(Segment::Text(std::mem::take(&mut text)));
        }
        if tag.as_str() == "<p>" {
            parents.push(std::mem::take(&mut current));
        } else if let Some(parent) = parents.pop() {
            let children = std::mem::replace(&mut current, parent);
            current.push(Segment::Paragraph(children));
        }
    }

    text.push_str(&html[cursor..]);
    if !text.is_empty() {
        current.push(Segment::Text(text));
    }
    current
}

fn render_segments(segments: &[Segment], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Paragraph(children) => {
                out.push_str("<p>");
                render_segments(children, out);
                out.push_str("</p>");
            }
        }
    }
}

fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    render_segments(segments, &mut out);
    out
}

/// Move paragraphs that open a paragraph (spaces aside) out in front of it.
fn hoist_leading(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Paragraph(children) = segment else {
            out.push(segment);
            continue;
        };

        let mut rest: VecDeque<_> = hoist_leading(children).into();
        let mut hoisted = false;
        while let Some(index) = rest.iter().position(|s| !s.is_blank())
            && matches!(rest.get(index), Some(Segment::Paragraph(_)))
        {
            rest.drain(..index);
            out.extend(rest.pop_front());
            hoisted = true;
        }

        if !hoisted || !rest.iter().all(Segment::is_break_gap) {
            out.push(Segment::Paragraph(rest.into()));
        }
    }
    out
}

/// Move paragraphs that close a paragraph (spaces and breaks aside) out
/// after it.
fn hoist_trailing(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Paragraph(children) = segment else {
            out.push(segment);
            continue;
        };

        let mut rest = hoist_trailing(children);
        let mut hoisted = Vec::new();
        while let Some(index) = rest.iter().rposition(|s| !s.is_break_gap())
            && matches!(rest.get(index), Some(Segment::Paragraph(_)))
        {
            rest.truncate(index + 1);
            hoisted.extend(rest.pop());
        }

        if hoisted.is_empty() || !rest.iter().all(Segment::is_break_gap) {
            out.push(Segment::Paragraph(rest));
        }
        out.extend(hoisted.into_iter().rev());
    }
    out
}

// ============================================================================
// Steps
// ============================================================================

/// Step 1
#[must_use]
pub fn wrap_in_paragraph(body: &str) -> String {
    format!("<p>{}</p>", body.trim())
}

/// Step 2: a paragraph whose content starts with another paragraph is
/// split so the inner one comes first. `<p><p>a</p>b</p>` becomes
/// `<p>a</p><p>b</p>`; a wrapper left with nothing but whitespace is dropped.
#[must_use]
pub fn collapse_nested_openings(html: &str) -> String {
    render(&hoist_leading(parse_segments(html)))
}

/// Step 3: the mirror of step 2 for content that ends with a paragraph.
/// `<p>a<p>b</p></p>` becomes `<p>a</p><p>b</p>`.
#[must_use]
pub fn collapse_nested_closings(html: &str) -> String {
    render(&hoist_trailing(parse_segments(html)))
}

/// Step 4
#[must_use]
pub fn newlines_to_breaks(html: &str) -> String {
    html.replace('\n', "<br />")
}

/// Step 5
#[must_use]
pub fn remove_empty_paragraphs(html: &str) -> String {
    EMPTY_PARAGRAPH_RE.replace_all(html, "").into_owned()
}

/// Step 6
#[must_use]
pub fn remove_breaks_after_closing(html: &str) -> String {
    BREAKS_AFTER_CLOSE_RE.replace_all(html, "</p>").into_owned()
}

/// Step 7
#[must_use]
pub fn remove_breaks_before_escaped_opening(html: &str) -> String {
    BREAKS_BEFORE_ESCAPED_OPEN_RE
        .replace_all(html, "<p>")
        .into_owned()
}

/// Step 8
#[must_use]
pub fn remove_breaks_before_closing(html: &str) -> String {
    BREAKS_BEFORE_CLOSE_RE.replace_all(html, "</p>").into_owned()
}

/// Step 9
#[must_use]
pub fn join_paragraphs_across_break(html: &str) -> String {
    BREAK_BETWEEN_PARAGRAPHS_RE
        .replace_all(html, "</p><p>")
        .into_owned()
}

/// Step 10
#[must_use]
pub fn join_paragraphs_across_space(html: &str) -> String {
    SPACE_BETWEEN_PARAGRAPHS_RE
        .replace_all(html, "</p><p>")
        .into_owned()
}

/// Wrap the transcoded body once and clean up redundant paragraph tags,
/// line breaks, and whitespace around paragraph boundaries.
#[must_use]
pub fn normalize(body: &str) -> String {
    let output = wrap_in_paragraph(body);
    let output = collapse_nested_openings(&output);
    let output = collapse_nested_closings(&output);
    let output = newlines_to_breaks(&output);
    let output = remove_empty_paragraphs(&output);
    let output = remove_breaks_after_closing(&output);
    let output = remove_breaks_before_escaped_opening(&output);
    let output = remove_breaks_before_closing(&output);
    let output = join_paragraphs_across_break(&output);
    join_paragraphs_across_space(&output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_trims() {
        assert_eq!(wrap_in_paragraph("  hi \n"), "<p>hi</p>");
        assert_eq!(wrap_in_paragraph(""), "<p></p>");
    }

    #[test]
    fn test_collapse_directly_nested() {
        assert_eq!(collapse_nested_openings("<p><p> <p>x</p></p></p>"), "<p>x</p>");
        assert_eq!(
            collapse_nested_openings("<p><p>a</p> <p>b</p></p>"),
            "<p>a</p><p>b</p>"
        );
    }

    #[test]
    fn test_collapse_splits_mixed_content() {
        assert_eq!(
            collapse_nested_openings("<p><p>a</p>tail</p>"),
            "<p>a</p><p>tail</p>"
        );
        assert_eq!(
            collapse_nested_closings("<p>intro<p>a</p></p>"),
            "<p>intro</p><p>a</p>"
        );
        assert_eq!(
            collapse_nested_closings("<p>a<p>b</p>\n</p>"),
            "<p>a</p><p>b</p>"
        );
        assert_eq!(
            collapse_nested_closings("<p>a<p>b</p><br /></p>"),
            "<p>a</p><p>b</p>"
        );
    }

    #[test]
    fn test_collapse_leaves_inner_paragraphs_alone() {
        for html in ["<p>x<p>y</p>z</p>", "<p>\n<p>a</p>tail</p>", "<ul><li><p>a</p></li></ul>"] {
            assert_eq!(collapse_nested_openings(html), html);
            assert_eq!(collapse_nested_closings(html), html);
        }
    }

    #[test]
    fn test_collapse_keeps_unmatched_tags_as_text() {
        assert_eq!(collapse_nested_closings("x</p></p>"), "x</p></p>");
        assert_eq!(collapse_nested_openings("<p><p>x</p>"), "<p><p>x</p>");
    }

    #[test]
    fn test_empty_paragraphs() {
        assert_eq!(remove_empty_paragraphs("<p>a</p> <p> </p><p>b</p>"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_breaks_at_paragraph_boundaries() {
        assert_eq!(
            remove_breaks_after_closing("<p>a</p><br /><br /><p>b</p>"),
            "<p>a</p><p>b</p>"
        );
        assert_eq!(remove_breaks_before_closing("<p>a<br /><br /></p>"), "<p>a</p>");
        assert_eq!(
            join_paragraphs_across_break("<p>a</p> <br /> <p>b</p>"),
            "<p>a</p><p>b</p>"
        );
        assert_eq!(join_paragraphs_across_space("<p>a</p> <p>b</p>"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_break_removal_keeps_tag_counts() {
        let html = "<p>a<p>b</p><br /></p>";
        assert_eq!(remove_breaks_after_closing(html), "<p>a<p>b</p></p>");
        assert_eq!(remove_breaks_before_closing(html), "<p>a<p>b</p></p>");
    }

    #[test]
    fn test_escaped_opening_rule_leaves_generated_markup_alone() {
        let html = "<p>a<br /><p>b</p>";
        assert_eq!(remove_breaks_before_escaped_opening(html), html);
        assert_eq!(remove_breaks_before_escaped_opening(r"x<br /><\p>"), "x<p>");
    }

    #[test]
    fn test_normalize_paragraph_sequence() {
        assert_eq!(normalize("<p>Hello</p>\n<p>World</p>"), "<p>Hello</p><p>World</p>");
    }

    #[test]
    fn test_normalize_mixed_block_content() {
        assert_eq!(normalize("<p>a<p></p></p>"), "<p>a</p>");
        assert_eq!(normalize("<p>intro<p>a</p></p>"), "<p>intro</p><p>a</p>");
        assert_eq!(normalize("<p>a<p>b</p>\n</p>"), "<p>a</p><p>b</p>");
        assert_eq!(
            normalize("<p>a</p><ul><li>x</li></ul><p>b</p>"),
            "<p>a</p><p><ul><li>x</li></ul></p><p>b</p>"
        );
    }

    #[test]
    fn test_normalize_inline_newlines() {
        assert_eq!(normalize("Best wishes,\nWG"), "<p>Best wishes,<br />WG</p>");
    }

    #[test]
    fn test_normalize_empty_body() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n "), "");
        assert_eq!(normalize("<p></p>"), "");
    }

    #[test]
    fn test_normalize_placeholder_block() {
        assert_eq!(
            normalize("before\n<p>[REMOVED]</p>\nafter"),
            "<p>before<br /><p>[REMOVED]</p>after</p>"
        );
    }

    #[test]
    fn test_normalize_is_idempotent_on_paragraph_output() {
        for html in [
            "<p>Hello</p><p>World</p>",
            "<p>Best wishes,<br />WG</p>",
            "<p>a</p><p><ul><li>x</li></ul></p><p>b</p>",
            "<p>before<br /><p>[REMOVED]</p>after</p>",
            "",
        ] {
            assert_eq!(normalize(html), html, "input: {html:?}");
        }
    }
}
