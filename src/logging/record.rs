//! Log levels and records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Detail useful only when diagnosing the tool itself
    Verbose,
    /// Normal progress output
    Info,
    /// Something unexpected that does not stop the run
    #[serde(rename = "warn")]
    Warning,
    /// A failure; also recorded in the error history
    Error,
}

impl Level {
    /// Lowercase name as written to log files
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Verbose => "verbose",
            Level::Info => "info",
            Level::Warning => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Verbose,
        }
    }
}

/// A single formatted log line on its way to the sinks.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Severity
    pub level: Level,
    /// `"<prefix> - <message>"`
    pub message: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Set for uncaught exceptions (panics), which only exception-handling sinks accept
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exception: bool,
}

impl LogRecord {
    /// Build a record from a prefix and message
    pub fn new(level: Level, prefix: &str, message: &str) -> Self {
        Self {
            level,
            message: format_message(prefix, message),
            timestamp: Utc::now(),
            exception: false,
        }
    }

    /// Build an uncaught-exception record
    pub fn exception(message: &str) -> Self {
        Self {
            level: Level::Error,
            message: message.to_string(),
            timestamp: Utc::now(),
            exception: true,
        }
    }

    /// Serialize as a single JSON line
    pub fn to_json_line(&self) -> String {
        // Serialization of plain strings and enums cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

/// Format a prefixed message the way every sink sees it.
pub fn format_message(prefix: &str, message: &str) -> String {
    format!("{} - {}", prefix, message)
}
