//! Error types for the conversion pipeline.
//!
//! The synchronous pipeline never surfaces these to its caller: a parse
//! failure is logged and the conversion continues with an empty tree.

use thiserror::Error;

/// The parsing adapter's failure outcome.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input exceeds the configured size limit
    #[error("Input of {size} bytes exceeds the {limit} byte parse limit")]
    InputTooLarge { size: usize, limit: usize },

    /// Failure reading the input, for parsers that stream it
    #[error("IO error while parsing: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of the async wrapper.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The blocking conversion task panicked or was cancelled
    #[error("Conversion task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
