//! Error types for release packaging operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for pack_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all pack_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Publishing pipeline errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Version resolution errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Environment configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Publishing pipeline errors. All of them are fatal.
#[derive(Error, Debug)]
pub enum PublishError {
    /// An orchestrated external command did not complete successfully
    #[error("Build step '{step}' failed running `{command}`: {reason}")]
    BuildStepFailure {
        /// Step name
        step: String,
        /// Full command line
        command: String,
        /// Exit status or spawn failure
        reason: String,
    },

    /// The packaged archive is not where it should be
    #[error("The final artifact to be published is missing: {path}")]
    MissingArtifact {
        /// Expected artifact location
        path: PathBuf,
    },

    /// Copying the artifact to the staging directory failed
    #[error("Failed to stage {from} to {to}: {reason}")]
    CopyFailed {
        /// Artifact path
        from: PathBuf,
        /// Staging path
        to: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Version resolution errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Package manifest could not be read
    #[error("Failed to read package manifest {path}: {reason}")]
    ManifestUnreadable {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Required manifest field missing
    #[error("Package manifest {path} has no '{field}' field")]
    MissingField {
        /// Manifest path
        path: PathBuf,
        /// Field name
        field: String,
    },

    /// Version parsing failed
    #[error("Failed to parse version '{version}': {source}")]
    ParseFailed {
        /// Version string
        version: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },
}

/// Environment configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable not set
    #[error("Environment variable {name} is not set")]
    MissingVariable {
        /// Variable name
        name: String,
    },

    /// Environment variable has an unusable value
    #[error("Environment variable {name} has invalid value '{value}': {reason}")]
    InvalidValue {
        /// Variable name
        name: String,
        /// Raw value
        value: String,
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl PublishError {
    /// Build step failure for a command that exited unsuccessfully
    pub fn step_failed(step: &str, command: &str, reason: impl Into<String>) -> Self {
        PublishError::BuildStepFailure {
            step: step.to_string(),
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    /// Build step failure for a command that ran past its timeout
    pub fn step_timed_out(step: &str, command: &str, timeout: Duration) -> Self {
        Self::step_failed(
            step,
            command,
            format!("timed out after {}s", timeout.as_secs()),
        )
    }
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Publish(PublishError::BuildStepFailure { command, .. }) => vec![
                format!("Re-run `{}` manually to inspect its output", command),
                "Check that the build tools are installed and on PATH".to_string(),
            ],
            ReleaseError::Publish(PublishError::MissingArtifact { path }) => vec![
                format!("Verify the packaging step writes {}", path.display()),
                "Check PACK_RELEASE_PRODUCT matches the package name".to_string(),
            ],
            ReleaseError::Config(ConfigError::MissingVariable { name }) => vec![
                format!("Export {} before running", name),
                "These variables are normally provided by the CI build agent".to_string(),
            ],
            ReleaseError::Cli(CliError::InvalidArguments { .. }) => vec![
                "The only accepted flag is --fake; run with --help for usage".to_string(),
            ],
            ReleaseError::Version(VersionError::ManifestUnreadable { .. }) => vec![
                "Run from the package root or set PACK_RELEASE_PACKAGE_ROOT".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
