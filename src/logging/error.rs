//! Logging failures.
//!
//! None of these ever reach the caller of a `log_*` method; they are kept on the
//! [`Logger`](super::Logger) for inspection.

use std::path::PathBuf;
use thiserror::Error;

/// Logging I/O failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// Writing a record to a sink failed
    #[error("Failed to write to log sink '{sink}': {reason}")]
    SinkWriteFailure {
        /// Sink name
        sink: String,
        /// Reason for the error
        reason: String,
    },

    /// File sinks could not be created in a directory
    #[error("Failed to set up log sinks in {path}: {reason}")]
    SinkSetup {
        /// Log directory
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}
