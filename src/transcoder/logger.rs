//! Logging capability handed to the transcoder.
//!
//! Logging never changes control flow. [`LogFacade`] forwards to the `log`
//! crate; [`MemoryLogger`] keeps entries so a caller (or a test) can inspect
//! what one conversion reported.

use serde::Serialize;
use std::error::Error;
use std::sync::Mutex;

pub trait ConversionLogger {
    fn warn(&self, message: &str, context: &str);
    fn error(&self, err: &dyn Error, context: &str);
}

/// Forwards to `log::warn!` / `log::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl ConversionLogger for LogFacade {
    fn warn(&self, message: &str, context: &str) {
        log::warn!("{message} {context}");
    }

    fn error(&self, err: &dyn Error, context: &str) {
        if context.is_empty() {
            log::error!("{err}");
        } else {
            log::error!("{err} ({context})");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: String,
}

/// Records entries in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Warn)
            .collect()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

impl ConversionLogger for MemoryLogger {
    fn warn(&self, message: &str, context: &str) {
        self.push(LogEntry {
            level: LogLevel::Warn,
            message: message.to_string(),
            context: context.to_string(),
        });
    }

    fn error(&self, err: &dyn Error, context: &str) {
        self.push(LogEntry {
            level: LogLevel::Error,
            message: err.to_string(),
            context: context.to_string(),
        });
    }
}

impl<L: ConversionLogger + ?Sized> ConversionLogger for &L {
    fn warn(&self, message: &str, context: &str) {
        (**self).warn(message, context);
    }

    fn error(&self, err: &dyn Error, context: &str) {
        (**self).error(err, context);
    }
}
