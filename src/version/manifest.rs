//! `package.json` backed version resolution

use super::{ReleaseVersionInfo, VersionResolver};
use crate::error::{Result, VersionError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The fields of `package.json` the release needs
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    /// Package name, possibly scoped
    pub name: Option<String>,
    /// Package version
    pub version: Option<String>,
}

impl PackageManifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VersionError::ManifestUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| {
            VersionError::ManifestUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Reads version and product name from `<package root>/package.json`
#[derive(Debug, Clone)]
pub struct ManifestVersionResolver {
    manifest_path: PathBuf,
    product_override: Option<String>,
    publish_branch: String,
}

impl ManifestVersionResolver {
    /// Resolver for the manifest in `package_root`
    pub fn new(package_root: &Path, publish_branch: impl Into<String>) -> Self {
        Self {
            manifest_path: package_root.join("package.json"),
            product_override: None,
            publish_branch: publish_branch.into(),
        }
    }

    /// Use `product` instead of the manifest name
    pub fn with_product(mut self, product: Option<String>) -> Self {
        self.product_override = product;
        self
    }

    fn required_field(&self, value: Option<String>, field: &str) -> Result<String> {
        value.ok_or_else(|| {
            VersionError::MissingField {
                path: self.manifest_path.clone(),
                field: field.to_string(),
            }
            .into()
        })
    }
}

impl VersionResolver for ManifestVersionResolver {
    fn version_info(&self) -> Result<ReleaseVersionInfo> {
        let manifest = PackageManifest::load(&self.manifest_path)?;
        let raw = self.required_field(manifest.version, "version")?;
        let version = semver::Version::parse(raw.trim())
            .map_err(|source| VersionError::ParseFailed { version: raw.clone(), source })?;
        Ok(ReleaseVersionInfo::from_version(version))
    }

    fn product_name(&self) -> Result<String> {
        if let Some(product) = &self.product_override {
            return Ok(product.clone());
        }
        let manifest = PackageManifest::load(&self.manifest_path)?;
        let name = self.required_field(manifest.name, "name")?;
        Ok(normalize_product_name(&name))
    }

    fn publish_branch(&self) -> &str {
        &self.publish_branch
    }
}

/// Tarball prefix for a package name: `@scope/pkg` becomes `scope-pkg`
pub fn normalize_product_name(name: &str) -> String {
    name.trim_start_matches('@').replace('/', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    fn write_manifest(dir: &Path, json: &str) {
        std::fs::write(dir.join("package.json"), json).unwrap();
    }

    #[test]
    fn test_reads_version_and_name() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{"name": "react-native", "version": "0.61.0"}"#);
        let resolver = ManifestVersionResolver::new(dir.path(), "master");

        let info = resolver.version_info().unwrap();
        assert_eq!(info.release_version.to_string(), "0.61.0");
        assert!(!info.is_tag_only());
        assert_eq!(resolver.product_name().unwrap(), "react-native");
        assert_eq!(resolver.publish_branch(), "master");
    }

    #[test]
    fn test_prerelease_is_tag_only() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{"name": "react-native", "version": "0.61.0-rc.1"}"#);
        let info = ManifestVersionResolver::new(dir.path(), "master")
            .version_info()
            .unwrap();
        assert_eq!(info.branch_version_suffix.as_deref(), Some("-rc.1"));
    }

    #[test]
    fn test_scoped_name_is_normalized() {
        assert_eq!(normalize_product_name("@office/react-native"), "office-react-native");
        assert_eq!(normalize_product_name("plain"), "plain");
    }

    #[test]
    fn test_product_override_skips_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = ManifestVersionResolver::new(dir.path(), "master")
            .with_product(Some("product".to_string()));
        assert_eq!(resolver.product_name().unwrap(), "product");
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestVersionResolver::new(dir.path(), "master")
            .version_info()
            .unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::Version(VersionError::ManifestUnreadable { .. })
        ));
    }

    #[test]
    fn test_missing_version_field() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{"name": "react-native"}"#);
        let err = ManifestVersionResolver::new(dir.path(), "master")
            .version_info()
            .unwrap_err();
        assert!(err.to_string().contains("'version'"));
    }

    #[test]
    fn test_invalid_version() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{"name": "x", "version": "sixty-one"}"#);
        let err = ManifestVersionResolver::new(dir.path(), "master")
            .version_info()
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Version(VersionError::ParseFailed { .. })));
    }
}
