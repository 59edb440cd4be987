//! Core configuration types for the conversion pipeline
//!
//! `ConversionOptions` carries the few literals the transcoder writes into
//! its output plus the parse size limit. `ParserConfig` holds the flags the
//! parsing adapter recognizes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::transcoder::link_canonicalizer::DEFAULT_LINK_BASE;

/// Block emitted in place of any forcefully removed element.
pub const DEFAULT_REMOVED_PLACEHOLDER: &str = "\n<p>[REMOVED]</p>\n";

/// Text written where an expected value is missing (image `src`/`alt`,
/// empty list items).
pub const DEFAULT_MISSING_ATTRIBUTE_LITERAL: &str = "undefined";

/// 16 MiB
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Errors raised while loading or validating options
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Options file could not be read
    #[error("Failed to read options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options file is not valid JSON for `ConversionOptions`
    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the pipeline cannot use
    #[error("Invalid option '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Options for one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Absolute thread root substituted for the leading `..` of legacy links
    pub link_base: String,

    /// Block emitted for forcefully removed elements
    pub removed_placeholder: String,

    /// Literal written for missing image attributes and empty list items
    pub missing_attribute_literal: String,

    /// Inputs longer than this fail to parse and convert to `""`
    pub max_input_bytes: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            link_base: DEFAULT_LINK_BASE.to_string(),
            removed_placeholder: DEFAULT_REMOVED_PLACEHOLDER.to_string(),
            missing_attribute_literal: DEFAULT_MISSING_ATTRIBUTE_LITERAL.to_string(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl ConversionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty `link_base` or a zero
    /// `max_input_bytes`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link_base.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "link_base",
                message: "must not be empty".to_string(),
            });
        }
        if self.max_input_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_input_bytes",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate options from a JSON string. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed JSON and `ConfigError::Invalid`
    /// when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`ConversionOptions::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Flags recognized by the parsing adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Collapse whitespace runs inside text nodes to one space
    pub normalize_whitespace: bool,

    /// Report recoverable parse errors with exact source positions
    pub track_source_positions: bool,
}
