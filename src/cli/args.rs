//! Command line argument parsing.
//!
//! The packager takes a single optional flag; everything else comes from the
//! build environment.

use crate::error::{CliError, Result};
use crate::publish::PublishMode;
use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;

/// Pack the source tree and stage the tarball for publishing
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "pack_release",
    version,
    about = "Pack the source tree and stage the tarball for publishing",
    long_about = "Build native archives (release branches only), pack the package into
<product>-<version>.tgz and stage it under $BUILD_STAGINGDIRECTORY/final.

Usage:
  pack_release           # live run
  pack_release --fake    # dry run: build and verify the tarball, never stage it"
)]
pub struct Args {
    /// Dry run: verify the artifact exists instead of staging it
    #[arg(long)]
    pub fake: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Result<Self> {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parse an argument list. Help and version requests print and exit 0;
    /// any other parse failure is `CliError::InvalidArguments`.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(args) => Ok(args),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => Err(CliError::InvalidArguments {
                reason: e.to_string().trim_end().to_string(),
            }
            .into()),
        }
    }

    /// Publish mode selected by the flags
    pub fn mode(&self) -> PublishMode {
        PublishMode::from_fake_flag(self.fake)
    }
}
