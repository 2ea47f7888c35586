//! Release note records.
//!
//! A [`NoteRecord`] is a single changelog entry derived from one pull
//! request. Records arrive already parsed; this module only defines their
//! shape and how a batch of them is loaded from disk.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Identifier of a note, normally the pull request number.
pub type NoteId = u64;

/// All notes for a release, keyed by identifier.
pub type ReleaseNotes = HashMap<NoteId, NoteRecord>;

/// The order in which notes should appear within their category.
pub type ReleaseNotesHistory = Vec<NoteId>;

/// Kind label for bug fixes.
pub const KIND_BUG: &str = "bug";
/// Kind label for features.
pub const KIND_FEATURE: &str = "feature";
/// Kind label for changes to an existing API.
pub const KIND_API_CHANGE: &str = "api-change";
/// Kind label for newly added APIs.
pub const KIND_NEW_API: &str = "new-api";

/// A single release note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteRecord {
    /// Pull request number, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<NoteId>,

    /// The Markdown body of the note.
    pub markdown: String,

    /// The note requires operator action on upgrade.
    pub action_required: bool,

    /// The note announces a new feature.
    pub feature: bool,

    /// The note is attributed to more than one SIG.
    pub duplicate: bool,

    /// Contributing group labels, e.g. `node` or `cluster-lifecycle`.
    pub sigs: Vec<String>,

    /// Kind labels, e.g. `bug` or `api-change`.
    pub kinds: Vec<String>,

    /// Author of the pull request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Link to the pull request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,

    /// Merge commit of the pull request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl NoteRecord {
    /// Create a note with the given Markdown body and no labels.
    #[must_use]
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            ..Self::default()
        }
    }

    /// Check if the note carries the given kind label.
    #[must_use]
    pub fn has_kind(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }

    /// Check if the note carries any kind that marks an API change.
    #[must_use]
    pub fn is_api_change(&self) -> bool {
        self.has_kind(KIND_API_CHANGE) || self.has_kind(KIND_NEW_API)
    }
}

/// A batch of notes plus the order they were merged in.
///
/// This is the on-disk input format:
///
/// ```json
/// {
///   "notes": { "1234": { "markdown": "Fixed a bug", "kinds": ["bug"] } },
///   "history": [1234]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesInput {
    /// Notes keyed by identifier.
    pub notes: ReleaseNotes,
    /// Processing order.
    pub history: ReleaseNotesHistory,
}

impl NotesInput {
    /// Load a notes batch from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading release notes from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|source| Error::NotesRead {
            path: path.to_path_buf(),
            source,
        })?;

        let input: Self = serde_json::from_str(&raw).map_err(|source| Error::NotesParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            notes = input.notes.len(),
            history = input.history.len(),
            "Loaded release notes"
        );
        Ok(input)
    }
}
