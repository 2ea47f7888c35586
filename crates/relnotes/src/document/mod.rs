//! The classified release notes document.
//!
//! [`build_document`] sorts a batch of notes into the buckets of a
//! [`Document`]. Precedence between buckets lives in [`rules`]; this module
//! only walks the history and appends.
//!
//! # Example
//!
//! ```
//! use relnotes::document::build_document;
//! use relnotes::note::{NoteRecord, ReleaseNotes};
//!
//! let mut notes = ReleaseNotes::new();
//! notes.insert(1, NoteRecord { kinds: vec!["bug".into()], ..NoteRecord::new("Fixed a leak") });
//! notes.insert(2, NoteRecord { action_required: true, ..NoteRecord::new("Removed a flag") });
//!
//! let doc = build_document(&notes, &[2, 1]);
//! assert_eq!(doc.action_required, vec!["Removed a flag"]);
//! assert_eq!(doc.bug_fixes, vec!["Fixed a leak"]);
//! ```

pub mod rules;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::note::{NoteId, ReleaseNotes};

pub use rules::{classify, Bucket, Rule, RULES};

/// A release notes document, organized by category.
///
/// Each bucket is an independent, append-only sequence. A note attributed to
/// several SIGs appears once in each of their buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// New features.
    pub new_features: Vec<String>,
    /// Notes requiring operator action.
    pub action_required: Vec<String>,
    /// API changes and additions.
    pub api_changes: Vec<String>,
    /// Notes shared by several SIGs, keyed by the composed SIG list header.
    #[serde(rename = "duplicate_notes")]
    pub duplicates: BTreeMap<String, Vec<String>>,
    /// Notes per SIG, keyed by raw SIG label.
    pub sigs: BTreeMap<String, Vec<String>>,
    /// Bug fixes.
    pub bug_fixes: Vec<String>,
    /// Notes with no other categorization.
    pub uncategorized: Vec<String>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note body to the given bucket, creating keyed buckets on first use.
    pub fn push(&mut self, bucket: Bucket, markdown: &str) {
        let notes = match bucket {
            Bucket::ActionRequired => &mut self.action_required,
            Bucket::NewFeatures => &mut self.new_features,
            Bucket::Duplicates(header) => self.duplicates.entry(header).or_default(),
            Bucket::Sig(sig) => self.sigs.entry(sig).or_default(),
            Bucket::ApiChanges => &mut self.api_changes,
            Bucket::BugFixes => &mut self.bug_fixes,
            Bucket::Uncategorized => &mut self.uncategorized,
        };
        notes.push(markdown.to_string());
    }

    /// Total number of bucket entries across the document.
    ///
    /// A note placed in several buckets counts once per bucket.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.new_features.len()
            + self.action_required.len()
            + self.api_changes.len()
            + self.duplicates.values().map(Vec::len).sum::<usize>()
            + self.sigs.values().map(Vec::len).sum::<usize>()
            + self.bug_fixes.len()
            + self.uncategorized.len()
    }

    /// Check if the document holds no notes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

/// Assemble a document from an unorganized set of notes.
///
/// Notes are visited in `history` order, so each bucket preserves the
/// relative order of its notes. Every identifier in `history` is expected to
/// have an entry in `notes`; identifiers without one are skipped.
#[must_use]
pub fn build_document(notes: &ReleaseNotes, history: &[NoteId]) -> Document {
    let mut doc = Document::new();

    for id in history {
        let Some(note) = notes.get(id) else {
            warn!(id, "Note listed in history has no record, skipping");
            continue;
        };

        let rule = rules::matching_rule(note);
        let buckets = (rule.place)(note);
        trace!(
            id,
            rule = rule.name,
            buckets = ?buckets.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Classified note"
        );
        for bucket in buckets {
            doc.push(bucket, &note.markdown);
        }
    }

    debug!(
        action_required = doc.action_required.len(),
        new_features = doc.new_features.len(),
        api_changes = doc.api_changes.len(),
        duplicates = doc.duplicates.len(),
        sigs = doc.sigs.len(),
        bug_fixes = doc.bug_fixes.len(),
        uncategorized = doc.uncategorized.len(),
        "Built release notes document"
    );
    doc
}
