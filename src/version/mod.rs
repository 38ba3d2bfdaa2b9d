//! Release version resolution.
//!
//! The publish pipeline only needs the version to package and whether the
//! branch is tag-only. Where that comes from is behind [`VersionResolver`];
//! [`ManifestVersionResolver`] reads it from `package.json`.

mod manifest;

pub use manifest::{ManifestVersionResolver, PackageManifest, normalize_product_name};

use crate::error::Result;
use semver::Version;

/// Version facts for one release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersionInfo {
    /// Version of the artifact to produce
    pub release_version: Version,
    /// Present on pre-release/tag-only branches, e.g. `-rc.1`
    pub branch_version_suffix: Option<String>,
}

impl ReleaseVersionInfo {
    /// Derive the branch suffix from the version's pre-release component
    pub fn from_version(release_version: Version) -> Self {
        let branch_version_suffix = (!release_version.pre.is_empty())
            .then(|| format!("-{}", release_version.pre));
        Self {
            release_version,
            branch_version_suffix,
        }
    }

    /// Whether this run only tags source and skips native build steps
    pub fn is_tag_only(&self) -> bool {
        self.branch_version_suffix.is_some()
    }
}

/// Supplies version info, product name and publish branch
pub trait VersionResolver {
    /// Version and branch suffix for this run
    fn version_info(&self) -> Result<ReleaseVersionInfo>;

    /// Product name used in the archive file name
    fn product_name(&self) -> Result<String>;

    /// Branch the release targets
    fn publish_branch(&self) -> &str;
}
