//! Publish command.

use crate::cli::OutputManager;
use crate::config::EnvConfig;
use crate::error::Result;
use crate::logging::Logger;
use crate::process::SystemRunner;
use crate::publish::{PublishMode, Publisher};
use crate::version::ManifestVersionResolver;
use std::sync::Arc;

/// Run the pipeline against the real environment and print a summary
pub(super) async fn execute_publish(
    mode: PublishMode,
    env_config: EnvConfig,
    logger: Arc<Logger>,
) -> Result<i32> {
    let resolver =
        ManifestVersionResolver::new(&env_config.package_root, &env_config.publish_branch)
            .with_product(env_config.product.clone());
    let runner = SystemRunner::new(env_config.command_timeout);
    let publisher = Publisher::new(env_config, runner, resolver, Arc::clone(&logger));

    let outcome = publisher.publish(mode).await?;

    let output = OutputManager::new();
    let _ = output.success(&format!("Packed v{} ({})", outcome.version, outcome.mode));
    let _ = output.indent(&format!("Artifact: {}", outcome.artifact.display()));
    if let Some(staged) = &outcome.staged {
        let _ = output.indent(&format!("Staged: {}", staged.display()));
    }
    if outcome.skipped_native {
        let _ = output.indent("Native archives: skipped (tag-only branch)");
    }

    Ok(publisher.exit_code())
}
