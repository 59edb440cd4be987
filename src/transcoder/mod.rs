//! Legacy body conversion pipeline
//!
//! Converts historical comment, message, note, and journal bodies into the
//! constrained HTML subset `p, a[href], img[src,alt], ol, ul, li, br`:
//! 1. Repair known escaping defects in the raw string
//! 2. Parse into an rcdom tree and sanitize it into owned nodes
//! 3. Transcode nodes through the tag classification table
//! 4. Normalize the joined output (single outer paragraph, no redundant
//!    wrappers or boundary line breaks)
//!
//! # Usage
//!
//! ```rust
//! # use legacy_body_transcoder::transcoder::convert;
//! let html = convert("<p>Hello</p>\n<p>World</p>");
//! assert_eq!(html, "<p>Hello</p><p>World</p>");
//! ```
//!
//! ## Collecting warnings
//! ```rust
//! # use legacy_body_transcoder::config::ConversionOptions;
//! # use legacy_body_transcoder::transcoder::{Html5everParser, MemoryLogger, Transcoder};
//! let options = ConversionOptions::default();
//! let logger = MemoryLogger::new();
//! let transcoder = Transcoder::with_parts(Html5everParser::default(), &logger, options);
//! assert_eq!(transcoder.convert("<foo>bar</foo>"), "");
//! assert_eq!(logger.warnings().len(), 1);
//! ```

pub mod dom_walker;
pub mod errors;
pub mod link_canonicalizer;
pub mod logger;
pub mod node;
pub mod parsing;
pub mod postprocessing;
pub mod preprocessing;
pub mod sanitize;
pub mod tag_table;

pub use dom_walker::TagTranscoder;
pub use errors::{ConvertError, ParseError};
pub use link_canonicalizer::{DEFAULT_LINK_BASE, canonicalize_href, canonicalize_href_with_base};
pub use logger::{ConversionLogger, LogEntry, LogFacade, LogLevel, MemoryLogger};
pub use node::{Element, Node};
pub use parsing::{Html5everParser, HtmlParser};
pub use postprocessing::normalize;
pub use preprocessing::repair;
pub use sanitize::sanitize;
pub use tag_table::{TAG_TABLE, TagCategory};

use crate::config::{ConversionOptions, ParserConfig};

/// One configured pipeline: parser, logger, and options.
///
/// Holds no per-conversion state, so one instance can convert any number of
/// bodies.
#[derive(Debug, Clone)]
pub struct Transcoder<P = Html5everParser, L = LogFacade> {
    parser: P,
    logger: L,
    options: ConversionOptions,
}

impl Transcoder {
    /// html5ever parser and `log` facade, with the parse limit taken from
    /// `options`.
    #[must_use]
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            parser: Html5everParser::new(options.max_input_bytes),
            logger: LogFacade,
            options,
        }
    }
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new(ConversionOptions::default())
    }
}

impl<P: HtmlParser, L: ConversionLogger> Transcoder<P, L> {
    pub fn with_parts(parser: P, logger: L, options: ConversionOptions) -> Self {
        Self {
            parser,
            logger,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Run the whole pipeline. Always returns a string: parse failures are
    /// logged and treated as an empty tree.
    #[must_use]
    pub fn convert(&self, input: &str) -> String {
        let repaired = repair(input);

        let nodes = match self.parser.parse(&repaired, &ParserConfig::default()) {
            Ok(nodes) => nodes,
            Err(e) => {
                self.logger.error(&e, "");
                Vec::new()
            }
        };

        let body = TagTranscoder::new(&self.options, &self.logger).transcode(&nodes);
        normalize(&body)
    }
}

/// Convert with default options, logging through the `log` facade.
#[must_use]
pub fn convert(input: &str) -> String {
    Transcoder::default().convert(input)
}

/// Convert with caller-supplied options and logger.
#[must_use]
pub fn convert_with<L: ConversionLogger>(
    input: &str,
    options: &ConversionOptions,
    logger: L,
) -> String {
    Transcoder::with_parts(
        Html5everParser::new(options.max_input_bytes),
        logger,
        options.clone(),
    )
    .convert(input)
}

/// Run [`convert`] on the blocking thread pool.
///
/// # Errors
///
/// Returns `ConvertError::Join` if the blocking task panics or is cancelled.
pub async fn convert_async(
    input: String,
    options: ConversionOptions,
) -> Result<String, ConvertError> {
    let output =
        tokio::task::spawn_blocking(move || Transcoder::new(options).convert(&input)).await?;
    Ok(output)
}
