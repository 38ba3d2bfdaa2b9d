//! # Pack Release
//!
//! Release packaging for npm-style source trees, driven from CI.
//!
//! ## Features
//!
//! - **Branch-aware builds**: native archives are built only on release
//!   branches; tag-only (pre-release) versions go straight to packing
//! - **Dry runs**: `--fake` builds and verifies the tarball without staging it
//! - **Gated staging**: the live copy into `$BUILD_STAGINGDIRECTORY/final` is
//!   behind `PACK_RELEASE_ENABLE_COPY`
//! - **Structured logging**: console plus per-level JSON log files, with an
//!   in-memory error history
//!
//! ## Usage
//!
//! ```bash
//! pack_release          # live run
//! pack_release --fake   # dry run
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod publish;
pub mod version;

// Re-export main types for public API
pub use cli::Args;
pub use config::EnvConfig;
pub use error::{ReleaseError, Result};
pub use logging::{Level, LogBridge, Logger};
pub use process::{CommandRunner, StepCommand, SystemRunner};
pub use publish::{BuildStep, PublishMode, PublishOutcome, Publisher, ReleasePlan};
pub use version::{ManifestVersionResolver, ReleaseVersionInfo, VersionResolver};
