//! Environment-driven configuration.
//!
//! The build agent supplies the sources and staging roots; everything else has
//! a default that matches the usual npm + gradle layout.

use crate::error::{ConfigError, Result};
use crate::process::StepCommand;
use std::path::PathBuf;
use std::time::Duration;

/// Build-sources root; the native build tool lives here
pub const SOURCES_DIR_VAR: &str = "BUILD_SOURCESDIRECTORY";
/// Build-staging root; published artifacts go under `final/`
pub const STAGING_DIR_VAR: &str = "BUILD_STAGINGDIRECTORY";

const PACKAGE_ROOT_VAR: &str = "PACK_RELEASE_PACKAGE_ROOT";
const PRODUCT_VAR: &str = "PACK_RELEASE_PRODUCT";
const NATIVE_COMMAND_VAR: &str = "PACK_RELEASE_NATIVE_COMMAND";
const REVERT_COMMAND_VAR: &str = "PACK_RELEASE_REVERT_COMMAND";
const PACK_COMMAND_VAR: &str = "PACK_RELEASE_PACK_COMMAND";
const ENABLE_COPY_VAR: &str = "PACK_RELEASE_ENABLE_COPY";
const PUBLISH_BRANCH_VAR: &str = "PACK_RELEASE_PUBLISH_BRANCH";
const COMMAND_TIMEOUT_VAR: &str = "PACK_RELEASE_COMMAND_TIMEOUT";
const LOG_DIR_VAR: &str = "PACK_RELEASE_LOG_DIR";

const DEFAULT_REVERT_COMMAND: &str = "git checkout ReactAndroid/gradle.properties";
const DEFAULT_PACK_COMMAND: &str = "npm pack";
const DEFAULT_PUBLISH_BRANCH: &str = "master";
const MAX_COMMAND_TIMEOUT_SECS: u64 = 86_400;

/// Runtime configuration read from the environment
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Build-sources root, needed only when the native step runs
    pub sources_dir: Option<PathBuf>,
    /// Build-staging root
    pub staging_dir: PathBuf,
    /// Where commands run and the archive is produced
    pub package_root: PathBuf,
    /// Product name override for the archive file name
    pub product: Option<String>,
    /// Native build command override
    pub native_command: Option<StepCommand>,
    /// Command restoring the temporarily edited build config
    pub revert_command: StepCommand,
    /// Command producing the archive
    pub pack_command: StepCommand,
    /// Whether live mode copies the artifact into staging
    pub copy_enabled: bool,
    /// Branch the release targets
    pub publish_branch: String,
    /// Per-command wall-clock limit
    pub command_timeout: Option<Duration>,
    /// Directory for file log sinks
    pub log_dir: Option<PathBuf>,
}

impl EnvConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::from_lookup(cwd, |name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup, with `cwd` as the default package root
    pub fn from_lookup<F>(cwd: PathBuf, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, as they do in CI variable templates
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let staging_dir = get(STAGING_DIR_VAR)
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::MissingVariable {
                name: STAGING_DIR_VAR.to_string(),
            })?;

        let native_command = get(NATIVE_COMMAND_VAR)
            .map(|v| parse_command(NATIVE_COMMAND_VAR, &v))
            .transpose()?;
        let revert_command = parse_command(
            REVERT_COMMAND_VAR,
            &get(REVERT_COMMAND_VAR).unwrap_or_else(|| DEFAULT_REVERT_COMMAND.to_string()),
        )?;
        let pack_command = parse_command(
            PACK_COMMAND_VAR,
            &get(PACK_COMMAND_VAR).unwrap_or_else(|| DEFAULT_PACK_COMMAND.to_string()),
        )?;

        let copy_enabled = get(ENABLE_COPY_VAR)
            .map(|v| parse_flag(ENABLE_COPY_VAR, &v))
            .transpose()?
            .unwrap_or(false);

        let command_timeout = get(COMMAND_TIMEOUT_VAR)
            .map(|v| parse_timeout(COMMAND_TIMEOUT_VAR, &v))
            .transpose()?
            .flatten();

        Ok(Self {
            sources_dir: get(SOURCES_DIR_VAR).map(PathBuf::from),
            staging_dir,
            package_root: get(PACKAGE_ROOT_VAR).map(PathBuf::from).unwrap_or(cwd),
            product: get(PRODUCT_VAR),
            native_command,
            revert_command,
            pack_command,
            copy_enabled,
            publish_branch: get(PUBLISH_BRANCH_VAR)
                .unwrap_or_else(|| DEFAULT_PUBLISH_BRANCH.to_string()),
            command_timeout,
            log_dir: get(LOG_DIR_VAR).map(PathBuf::from),
        })
    }

    /// Native build command: the override, or `<sources>/gradlew installArchives`
    pub fn native_command(&self) -> Result<StepCommand> {
        if let Some(command) = &self.native_command {
            return Ok(command.clone());
        }
        let sources = self
            .sources_dir
            .as_ref()
            .ok_or_else(|| ConfigError::MissingVariable {
                name: SOURCES_DIR_VAR.to_string(),
            })?;
        Ok(StepCommand::new(
            sources.join("gradlew").to_string_lossy(),
            ["installArchives"],
        ))
    }

    /// `<staging>/final`
    pub fn final_dir(&self) -> PathBuf {
        self.staging_dir.join("final")
    }
}

fn parse_command(name: &str, value: &str) -> Result<StepCommand> {
    StepCommand::parse(value).ok_or_else(|| {
        ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: "command is empty".to_string(),
        }
        .into()
    })
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected true/false".to_string(),
        }
        .into()),
    }
}

/// Seconds, clamped to a day; `0` disables the timeout
fn parse_timeout(name: &str, value: &str) -> Result<Option<Duration>> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })?
        .min(MAX_COMMAND_TIMEOUT_SECS);
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<EnvConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(PathBuf::from("/work"), move |name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[(STAGING_DIR_VAR, "/staging")]).unwrap();
        assert_eq!(config.package_root, PathBuf::from("/work"));
        assert_eq!(config.final_dir(), PathBuf::from("/staging/final"));
        assert_eq!(config.pack_command.to_string(), "npm pack");
        assert_eq!(
            config.revert_command.to_string(),
            "git checkout ReactAndroid/gradle.properties"
        );
        assert!(!config.copy_enabled);
        assert_eq!(config.publish_branch, "master");
        assert!(config.command_timeout.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_missing_staging_dir() {
        let err = load(&[]).unwrap_err();
        match err {
            ReleaseError::Config(ConfigError::MissingVariable { name }) => {
                assert_eq!(name, STAGING_DIR_VAR)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_native_command_from_sources_dir() {
        let config = load(&[(STAGING_DIR_VAR, "/staging"), (SOURCES_DIR_VAR, "/src")]).unwrap();
        let command = config.native_command().unwrap();
        assert_eq!(command.program, "/src/gradlew");
        assert_eq!(command.args, vec!["installArchives".to_string()]);
    }

    #[test]
    fn test_native_command_needs_sources_dir() {
        let config = load(&[(STAGING_DIR_VAR, "/staging")]).unwrap();
        assert!(config.native_command().is_err());
    }

    #[test]
    fn test_copy_flag_values() {
        let on = load(&[(STAGING_DIR_VAR, "/s"), (ENABLE_COPY_VAR, "Yes")]).unwrap();
        assert!(on.copy_enabled);
        let off = load(&[(STAGING_DIR_VAR, "/s"), (ENABLE_COPY_VAR, "0")]).unwrap();
        assert!(!off.copy_enabled);
        assert!(load(&[(STAGING_DIR_VAR, "/s"), (ENABLE_COPY_VAR, "maybe")]).is_err());
    }

    #[test]
    fn test_timeout_clamped_and_zero_disables() {
        let clamped = load(&[(STAGING_DIR_VAR, "/s"), (COMMAND_TIMEOUT_VAR, "999999")]).unwrap();
        assert_eq!(
            clamped.command_timeout,
            Some(Duration::from_secs(MAX_COMMAND_TIMEOUT_SECS))
        );
        let none = load(&[(STAGING_DIR_VAR, "/s"), (COMMAND_TIMEOUT_VAR, "0")]).unwrap();
        assert!(none.command_timeout.is_none());
        assert!(load(&[(STAGING_DIR_VAR, "/s"), (COMMAND_TIMEOUT_VAR, "soon")]).is_err());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[(STAGING_DIR_VAR, "/s"), (PACK_COMMAND_VAR, "  ")]).unwrap();
        assert_eq!(config.pack_command.to_string(), "npm pack");
    }
}
