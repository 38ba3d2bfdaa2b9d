//! Artifact naming, verification and staging.

use crate::error::{PublishError, Result};
use semver::Version;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Archive extension produced by the packaging step
pub const ARCHIVE_EXTENSION: &str = "tgz";

/// Where the archive is produced and where it gets staged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// `<product>-<version>.tgz`
    pub file_name: String,
    /// Produced archive, in the package root
    pub artifact_path: PathBuf,
    /// Copy destination under the staging `final` directory
    pub staging_path: PathBuf,
}

impl ReleasePlan {
    /// Compute both paths for a product and version
    pub fn new(product: &str, version: &Version, package_root: &Path, final_dir: &Path) -> Self {
        let file_name = archive_file_name(product, version);
        Self {
            artifact_path: package_root.join(&file_name),
            staging_path: final_dir.join(&file_name),
            file_name,
        }
    }

    /// Fail with `MissingArtifact` unless the archive exists as a file
    pub async fn verify_artifact(&self) -> Result<u64> {
        match fs::metadata(&self.artifact_path).await {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            _ => Err(PublishError::MissingArtifact {
                path: self.artifact_path.clone(),
            }
            .into()),
        }
    }

    /// Copy the archive into staging, creating the `final` directory.
    ///
    /// The staged copy must match the source length.
    pub async fn stage(&self) -> Result<PathBuf> {
        let expected = self.verify_artifact().await?;
        let copy_failed = |reason: String| PublishError::CopyFailed {
            from: self.artifact_path.clone(),
            to: self.staging_path.clone(),
            reason,
        };

        if let Some(dest_dir) = self.staging_path.parent() {
            fs::create_dir_all(dest_dir)
                .await
                .map_err(|e| copy_failed(e.to_string()))?;
        }
        let copied = fs::copy(&self.artifact_path, &self.staging_path)
            .await
            .map_err(|e| copy_failed(e.to_string()))?;
        if copied != expected {
            return Err(copy_failed(format!("copied {} of {} bytes", copied, expected)).into());
        }
        Ok(self.staging_path.clone())
    }
}

/// `<product>-<version>.tgz`
pub fn archive_file_name(product: &str, version: &Version) -> String {
    format!("{}-{}.{}", product, version, ARCHIVE_EXTENSION)
}
