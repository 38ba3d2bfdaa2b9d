//! Command execution.
//!
//! Loads the environment configuration, attaches file log sinks when a log
//! directory is configured, and runs the publish pipeline.

mod publish;

use crate::cli::Args;
use crate::config::EnvConfig;
use crate::error::Result;
use crate::logging::Logger;
use std::sync::Arc;

use publish::execute_publish;

/// Execute the command described by the parsed arguments
pub async fn execute_command(args: Args, logger: Arc<Logger>) -> Result<i32> {
    let env_config = EnvConfig::from_env()?;

    if let Some(dir) = &env_config.log_dir {
        match logger.configure_file_sinks(dir) {
            Ok(_) => logger.verbose("Logger", &format!("Writing logs to {}", dir.display())),
            // Non-fatal - console logging still works
            Err(e) => logger.warn("Logger", &e.to_string()),
        }
    }

    execute_publish(args.mode(), env_config, logger).await
}
