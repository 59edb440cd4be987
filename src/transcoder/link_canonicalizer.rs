//! Rewrites legacy relative thread links into absolute URLs.
//!
//! Legacy posts link to other threads with hrefs like `../432148/` or
//! `../427943/welcome/#Comment1295906`, and the raw-string repair leaves
//! `\"` artifacts around hrefs that were written with doubled quotes.

/// Thread root that replaces the leading `..` of a relative href.
pub const DEFAULT_LINK_BASE: &str = "https://www.bigwhitewall.com/talkabouts/thread";

/// Escaped-quote artifact left behind by the raw-string repair.
const ESCAPED_QUOTE: &str = "\\\"";

/// Canonicalize `href` against [`DEFAULT_LINK_BASE`].
#[must_use]
pub fn canonicalize_href(href: &str) -> String {
    canonicalize_href_with_base(href, DEFAULT_LINK_BASE)
}

/// Strip every `\"` artifact, then replace the first `..` with `base`.
///
/// No separator is inserted: `../432148/` becomes `{base}/432148/` because
/// the slash is already in the href.
#[must_use]
pub fn canonicalize_href_with_base(href: &str, base: &str) -> String {
    let unquoted = href.replace(ESCAPED_QUOTE, "");
    unquoted.replacen("..", base, 1)
}
