//! Release packaging pipeline.
//!
//! Runs the native archive build and config revert (release branches only),
//! packs the source tree into `<product>-<version>.tgz`, then either verifies
//! the archive (dry run) or stages it under `<staging>/final` (live).
//!
//! Steps run strictly in sequence. The first failure aborts the run; the
//! publisher's exit code is set to 1 before the error is returned so callers
//! that only look at the exit code still see it.

mod plan;

pub use plan::{ARCHIVE_EXTENSION, ReleasePlan, archive_file_name};

use crate::config::EnvConfig;
use crate::error::{PublishError, ReleaseError, Result};
use crate::logging::Logger;
use crate::process::{CommandRunner, StepCommand};
use crate::version::{ReleaseVersionInfo, VersionResolver};
use semver::Version;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

const LOG_PREFIX: &str = "Publish";

/// Whether the final staging copy happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    /// Stage the artifact
    Live,
    /// Build and verify the artifact, never stage it
    DryRun,
}

impl PublishMode {
    /// `--fake` selects dry run
    pub fn from_fake_flag(fake: bool) -> Self {
        if fake { PublishMode::DryRun } else { PublishMode::Live }
    }
}

impl fmt::Display for PublishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishMode::Live => f.write_str("live"),
            PublishMode::DryRun => f.write_str("dry-run"),
        }
    }
}

/// Orchestrated build steps, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// Compile native archives (with generated docs)
    NativeArchives,
    /// Restore the build config edited for doc generation
    RevertConfig,
    /// Produce the archive
    Pack,
}

impl BuildStep {
    /// Step name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            BuildStep::NativeArchives => "native-archives",
            BuildStep::RevertConfig => "revert-config",
            BuildStep::Pack => "pack",
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Packaged version
    pub version: Version,
    /// Mode the run used
    pub mode: PublishMode,
    /// Archive in the package root
    pub artifact: PathBuf,
    /// Staged copy, when one was made
    pub staged: Option<PathBuf>,
    /// True on tag-only branches
    pub skipped_native: bool,
}

/// Runs the packaging pipeline
pub struct Publisher<R, V> {
    config: EnvConfig,
    runner: R,
    resolver: V,
    logger: Arc<Logger>,
    exit_code: AtomicI32,
}

impl<R: CommandRunner, V: VersionResolver> Publisher<R, V> {
    /// Create a publisher
    pub fn new(config: EnvConfig, runner: R, resolver: V, logger: Arc<Logger>) -> Self {
        Self {
            config,
            runner,
            resolver,
            logger,
            exit_code: AtomicI32::new(0),
        }
    }

    /// 1 once any step has failed, 0 otherwise
    pub fn exit_code(&self) -> i32 {
        self.exit_code.load(Ordering::SeqCst)
    }

    fn mark_failed(&self) {
        self.exit_code.store(1, Ordering::SeqCst);
    }

    /// Run the whole pipeline
    pub async fn publish(&self, mode: PublishMode) -> Result<PublishOutcome> {
        let result = self.run_pipeline(mode).await;
        if let Err(e) = &result {
            self.mark_failed();
            // Step failures were already logged by `exec`
            if !matches!(e, ReleaseError::Publish(PublishError::BuildStepFailure { .. })) {
                self.logger.error(LOG_PREFIX, &e.to_string());
            }
        }
        result
    }

    async fn run_pipeline(&self, mode: PublishMode) -> Result<PublishOutcome> {
        self.logger.info(
            LOG_PREFIX,
            &format!("Target branch to publish to: {}", self.resolver.publish_branch()),
        );
        self.logger.verbose(LOG_PREFIX, &format!("Mode: {}", mode));

        let info: ReleaseVersionInfo = self.resolver.version_info()?;
        let product = self.resolver.product_name()?;

        let skipped_native = info.is_tag_only();
        if skipped_native {
            self.logger.info(
                LOG_PREFIX,
                &format!(
                    "Version suffix '{}' marks a tag-only branch; skipping native archives",
                    info.branch_version_suffix.as_deref().unwrap_or_default()
                ),
            );
        } else {
            let native = self.config.native_command()?;
            self.exec(BuildStep::NativeArchives, &native).await?;
            self.exec(BuildStep::RevertConfig, &self.config.revert_command).await?;
        }

        self.exec(BuildStep::Pack, &self.config.pack_command).await?;

        let plan = ReleasePlan::new(
            &product,
            &info.release_version,
            &self.config.package_root,
            &self.config.final_dir(),
        );
        self.logger.info(
            LOG_PREFIX,
            &format!(
                "Copying tar file {} to: {}",
                plan.artifact_path.display(),
                plan.staging_path.display()
            ),
        );

        let staged = match mode {
            PublishMode::DryRun => {
                let size = plan.verify_artifact().await?;
                self.logger.info(
                    LOG_PREFIX,
                    &format!("Dry run: {} present ({} bytes), not staged", plan.file_name, size),
                );
                None
            }
            PublishMode::Live if self.config.copy_enabled => {
                let staged = plan.stage().await?;
                self.logger.info(LOG_PREFIX, "Successfully published.");
                Some(staged)
            }
            PublishMode::Live => {
                self.logger.warn(
                    LOG_PREFIX,
                    "Staging copy is disabled; \
                     set PACK_RELEASE_ENABLE_COPY=true to stage the artifact",
                );
                self.logger.info(LOG_PREFIX, "Successfully published.");
                None
            }
        };

        Ok(PublishOutcome {
            version: info.release_version,
            mode,
            artifact: plan.artifact_path,
            staged,
            skipped_native,
        })
    }

    async fn exec(&self, step: BuildStep, command: &StepCommand) -> Result<()> {
        self.logger
            .info(LOG_PREFIX, &format!("Running command: {}", command));
        if let Err(e) = self
            .runner
            .run(step.name(), command, &self.config.package_root)
            .await
        {
            self.mark_failed();
            self.logger
                .error(LOG_PREFIX, &format!("Failure running: {}", command));
            self.logger.verbose(LOG_PREFIX, &e.to_string());
            return Err(e);
        }
        Ok(())
    }
}
