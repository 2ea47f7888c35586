//! Error types for relnotes.
//!
//! This module defines all error types used throughout the relnotes crate,
//! providing detailed context for debugging and user-friendly error messages.
//!
//! Rendering failures fall into two classes: configuration errors (the
//! caller asked for something that cannot be produced with the parameters
//! given) and I/O errors (the environment failed us). See
//! [`Error::is_config_error`] and [`Error::is_io_error`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for relnotes operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A downloads table was requested without both release tags.
    #[error("release tags not specified (previous: {previous:?}, new: {new:?})")]
    MissingReleaseTags {
        /// The previous tag as supplied.
        previous: String,
        /// The new tag as supplied.
        new: String,
    },

    // === Input Errors ===
    /// Failed to read the release notes input file.
    #[error("failed to read release notes from {path}: {source}")]
    NotesRead {
        /// Path to the notes file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The release notes input could not be parsed.
    #[error("failed to parse release notes from {path}: {source}")]
    NotesParse {
        /// Path to the notes file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    // === Artifact Errors ===
    /// An artifact glob pattern was malformed.
    #[error("invalid artifact pattern '{pattern}': {source}")]
    GlobPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error.
        #[source]
        source: glob::PatternError,
    },

    /// A path matched by an artifact pattern could not be read.
    #[error("failed to walk artifact directory: {0}")]
    Glob(#[from] glob::GlobError),

    /// An artifact file could not be opened.
    #[error("failed to open artifact {path}: {source}")]
    ArtifactOpen {
        /// Path to the artifact.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An artifact file could not be read to completion.
    #[error("failed to read artifact {path}: {source}")]
    ArtifactRead {
        /// Path to the artifact.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Output Errors ===
    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create the output file.
    #[error("failed to create output file {path}: {source}")]
    OutputCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for relnotes operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a missing release tags error.
    #[must_use]
    pub fn missing_release_tags(previous: impl Into<String>, new: impl Into<String>) -> Self {
        Self::MissingReleaseTags {
            previous: previous.into(),
            new: new.into(),
        }
    }

    /// Check if this error is caused by invalid or incomplete configuration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } | Self::MissingReleaseTags { .. }
        )
    }

    /// Check if this error originates from the file system or the output sink.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::GlobPattern { .. }
                | Self::Glob(_)
                | Self::ArtifactOpen { .. }
                | Self::ArtifactRead { .. }
                | Self::OutputCreate { .. }
                | Self::NotesRead { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_release_tags_display() {
        let err = Error::missing_release_tags("", "v1.2.0");
        let msg = err.to_string();
        assert!(msg.contains("release tags not specified"));
        assert!(msg.contains("v1.2.0"));
    }

    #[test]
    fn test_missing_release_tags_is_config_error() {
        let err = Error::missing_release_tags("v1.1.0", "");
        assert!(err.is_config_error());
        assert!(!err.is_io_error());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("bucket must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid configuration: bucket must not be empty"
        );
        assert!(err.is_config_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("pipe closed"));
        assert!(err.is_io_error());
    }

    #[test]
    fn test_glob_pattern_error_is_io_error() {
        let source = glob::Pattern::new("[").unwrap_err();
        let err = Error::GlobPattern {
            pattern: "[".to_string(),
            source,
        };
        assert!(err.is_io_error());
        assert!(err.to_string().contains("invalid artifact pattern"));
    }

    #[test]
    fn test_artifact_open_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::ArtifactOpen {
            path: PathBuf::from("/out/kubernetes.tar.gz"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/out/kubernetes.tar.gz"));
        assert!(msg.contains("access denied"));
        assert!(err.is_io_error());
    }

    #[test]
    fn test_artifact_read_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err = Error::ArtifactRead {
            path: PathBuf::from("/out/kubernetes-src.tar.gz"),
            source: io_err,
        };
        assert!(err.to_string().contains("kubernetes-src.tar.gz"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
            assert!(!err.is_config_error());
        }
    }

    #[test]
    fn test_notes_parse_error_display() {
        let source = serde_json::from_str::<i32>("{").unwrap_err();
        let err = Error::NotesParse {
            path: PathBuf::from("notes.json"),
            source,
        };
        assert!(err.to_string().contains("notes.json"));
    }
}
