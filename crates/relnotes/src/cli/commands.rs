//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::ReleaseConfig;

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// JSON file holding the notes and their history
    pub notes: PathBuf,

    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Write the Markdown to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Classify command arguments.
#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// JSON file holding the notes and their history
    pub notes: PathBuf,

    /// Pretty-print the JSON document
    #[arg(short, long)]
    pub pretty: bool,
}

/// Release parameters that override the configuration.
#[derive(Debug, Default, Args)]
pub struct ReleaseArgs {
    /// Bucket the release artifacts are published to
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Directory holding the release artifacts (enables the downloads table)
    #[arg(short, long, value_name = "DIR")]
    pub artifact_dir: Option<String>,

    /// Tag of the previous release
    #[arg(long, value_name = "TAG")]
    pub previous_tag: Option<String>,

    /// Tag of the release being documented
    #[arg(long, value_name = "TAG")]
    pub new_tag: Option<String>,
}

impl ReleaseArgs {
    /// Overlay the flags that were given onto `release`.
    pub fn apply_to(&self, release: &mut ReleaseConfig) {
        if let Some(bucket) = &self.bucket {
            release.bucket.clone_from(bucket);
        }
        if let Some(dir) = &self.artifact_dir {
            release.artifact_dir.clone_from(dir);
        }
        if let Some(tag) = &self.previous_tag {
            release.previous_tag.clone_from(tag);
        }
        if let Some(tag) = &self.new_tag {
            release.new_tag.clone_from(tag);
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_args_override_only_given_fields() {
        let mut release = ReleaseConfig {
            previous_tag: "v1.14.0".to_string(),
            ..ReleaseConfig::default()
        };
        let args = ReleaseArgs {
            artifact_dir: Some("_output".to_string()),
            new_tag: Some("v1.15.0".to_string()),
            ..ReleaseArgs::default()
        };

        args.apply_to(&mut release);
        assert_eq!(release.bucket, "kubernetes-release");
        assert_eq!(release.artifact_dir, "_output");
        assert_eq!(release.previous_tag, "v1.14.0");
        assert_eq!(release.new_tag, "v1.15.0");
    }

    #[test]
    fn test_empty_release_args_change_nothing() {
        let mut release = ReleaseConfig::default();
        ReleaseArgs::default().apply_to(&mut release);
        assert_eq!(release, ReleaseConfig::default());
    }
}
