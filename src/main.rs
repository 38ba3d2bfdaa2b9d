//! pack_release - build, pack and stage a release tarball.
//!
//! Exits 0 on success and 1 on any failure, including a failed dry-run
//! verification.

use pack_release::cli;
use pack_release::cli::OutputManager;
use pack_release::logging::{LogBridge, Logger};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let logger = Arc::new(Logger::new());
    Logger::install_panic_hook(Arc::clone(&logger));
    if let Err(e) = LogBridge::new(Arc::clone(&logger)).install() {
        logger.warn("Logger", &format!("log facade unavailable: {e}"));
    }

    match cli::run(Arc::clone(&logger)).await {
        Ok(exit_code) => {
            logger.flush();
            process::exit(exit_code);
        }
        Err(e) => {
            // Failures are already in the error history; this is the terminal summary
            let output = OutputManager::new();
            let _ = output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            logger.flush();
            process::exit(1);
        }
    }
}
