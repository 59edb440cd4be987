//! Configuration for the conversion pipeline
//!
//! This module provides `ConversionOptions`, its fluent builder, and the
//! `ParserConfig` flags handed to the parsing adapter.

// Sub-modules
pub mod builder;
pub mod types;

// Re-exports for public API
pub use builder::ConversionOptionsBuilder;
pub use types::{
    ConfigError, ConversionOptions, DEFAULT_MAX_INPUT_BYTES, DEFAULT_MISSING_ATTRIBUTE_LITERAL,
    DEFAULT_REMOVED_PLACEHOLDER, ParserConfig,
};
