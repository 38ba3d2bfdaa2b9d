//! Command line interface for pack_release.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;
use crate::logging::Logger;
use std::sync::Arc;

/// Main CLI entry point
pub async fn run(logger: Arc<Logger>) -> Result<i32> {
    let args = Args::parse_args()?;
    execute_command(args, logger).await
}
