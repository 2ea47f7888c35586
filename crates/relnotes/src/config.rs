//! Configuration management for relnotes.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::PRODUCTION_BUCKET;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "relnotes";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RELNOTES_`, e.g. `RELNOTES_RELEASE__NEW_TAG`)
/// 2. TOML config file at `~/.config/relnotes/config.toml`
/// 3. Default values
///
/// Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Release and artifact configuration.
    pub release: ReleaseConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

/// Release-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Bucket the release artifacts are published to.
    pub bucket: String,
    /// Directory holding the release artifacts.
    /// Leave empty to skip the downloads table.
    pub artifact_dir: String,
    /// Tag of the previous release.
    pub previous_tag: String,
    /// Tag of the release being documented.
    pub new_tag: String,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File to write the rendered notes to.
    /// Defaults to standard output.
    pub path: Option<PathBuf>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            bucket: PRODUCTION_BUCKET.to_string(),
            artifact_dir: String::new(),
            previous_tag: String::new(),
            new_tag: String::new(),
        }
    }
}

impl ReleaseConfig {
    /// Whether a downloads table will be rendered.
    #[must_use]
    pub fn wants_downloads_table(&self) -> bool {
        !self.artifact_dir.is_empty()
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("RELNOTES_").split("__"));

        let config: Config = figment.extract()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// Loading does not validate, since tags are usually supplied on the
    /// command line after the file and environment are read.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.release.bucket.trim().is_empty() {
            return Err(Error::config_validation("bucket must not be empty"));
        }

        if self.release.wants_downloads_table()
            && (self.release.previous_tag.is_empty() || self.release.new_tag.is_empty())
        {
            return Err(Error::config_validation(format!(
                "artifact_dir ({}) requires both previous_tag and new_tag",
                self.release.artifact_dir
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.release.bucket, "kubernetes-release");
        assert!(config.release.artifact_dir.is_empty());
        assert!(!config.release.wants_downloads_table());
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_bucket() {
        let mut config = Config::default();
        config.release.bucket = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bucket"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_artifact_dir_without_tags() {
        let mut config = Config::default();
        config.release.artifact_dir = "_output/release-tars".to_string();
        config.release.new_tag = "v1.15.0".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("previous_tag"));
    }

    #[test]
    fn test_validate_artifact_dir_with_tags() {
        let mut config = Config::default();
        config.release.artifact_dir = "_output/release-tars".to_string();
        config.release.previous_tag = "v1.14.0".to_string();
        config.release.new_tag = "v1.15.0".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("relnotes"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Missing files fall back to defaults
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[release]\nbucket = \"kubernetes-release-dev\"\nprevious_tag = \"v1.14.0\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.release.bucket, "kubernetes-release-dev");
        assert_eq!(config.release.previous_tag, "v1.14.0");
        assert!(config.release.new_tag.is_empty());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[release\nbucket = ").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_release_config_deserialize() {
        let json = r#"{"new_tag": "v1.15.0"}"#;
        let release: ReleaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(release.new_tag, "v1.15.0");
        assert_eq!(release.bucket, PRODUCTION_BUCKET);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("artifact_dir"));
        assert!(json.contains("previous_tag"));
    }
}
