//! Fluent builder for `ConversionOptions`
//!
//! Starts from the defaults; `build()` validates before handing the options
//! back.

use super::types::{ConfigError, ConversionOptions};

#[derive(Debug, Clone, Default)]
pub struct ConversionOptionsBuilder {
    options: ConversionOptions,
}

impl ConversionOptions {
    /// Create a builder for configuring `ConversionOptions` with a fluent interface
    #[must_use]
    pub fn builder() -> ConversionOptionsBuilder {
        ConversionOptionsBuilder::default()
    }
}

impl ConversionOptionsBuilder {
    #[must_use]
    pub fn link_base(mut self, base: impl Into<String>) -> Self {
        self.options.link_base = base.into();
        self
    }

    #[must_use]
    pub fn removed_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.removed_placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn missing_attribute_literal(mut self, literal: impl Into<String>) -> Self {
        self.options.missing_attribute_literal = literal.into();
        self
    }

    #[must_use]
    pub fn max_input_bytes(mut self, limit: usize) -> Self {
        self.options.max_input_bytes = limit;
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when the options fail validation.
    pub fn build(self) -> Result<ConversionOptions, ConfigError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
