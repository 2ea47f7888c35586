//! Classification rules.
//!
//! Each rule pairs a predicate with a placement. Rules are evaluated in
//! order and the first whose predicate holds decides where a note goes.

use std::fmt;

use crate::note::{NoteRecord, KIND_BUG};
use crate::prettify::sig_list_header;

/// A destination bucket within a [`Document`](super::Document).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Notes requiring operator action.
    ActionRequired,
    /// New features.
    NewFeatures,
    /// Notes shared by a set of SIGs, keyed by the composed header.
    Duplicates(String),
    /// Notes attributed to a single SIG.
    Sig(String),
    /// API changes and additions.
    ApiChanges,
    /// Bug fixes with no other categorization.
    BugFixes,
    /// Everything else.
    Uncategorized,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActionRequired => write!(f, "action_required"),
            Self::NewFeatures => write!(f, "new_features"),
            Self::Duplicates(header) => write!(f, "duplicates[{header}]"),
            Self::Sig(sig) => write!(f, "sigs[{sig}]"),
            Self::ApiChanges => write!(f, "api_changes"),
            Self::BugFixes => write!(f, "bug_fixes"),
            Self::Uncategorized => write!(f, "uncategorized"),
        }
    }
}

/// A single classification rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Name used in trace output.
    pub name: &'static str,
    /// Whether the rule claims the note.
    pub matches: fn(&NoteRecord) -> bool,
    /// Buckets the note is placed in when the rule matches.
    pub place: fn(&NoteRecord) -> Vec<Bucket>,
}

/// The classification rules, in precedence order.
///
/// The last rule always matches, so every note is placed somewhere.
pub const RULES: &[Rule] = &[
    Rule {
        name: "action_required",
        matches: |note| note.action_required,
        place: |_| vec![Bucket::ActionRequired],
    },
    Rule {
        name: "feature",
        matches: |note| note.feature,
        place: |_| vec![Bucket::NewFeatures],
    },
    Rule {
        name: "duplicate",
        matches: |note| note.duplicate,
        place: |note| vec![Bucket::Duplicates(sig_list_header(&note.sigs))],
    },
    Rule {
        name: "categorized",
        matches: |note| !note.sigs.is_empty() || note.is_api_change(),
        place: categorized_buckets,
    },
    Rule {
        name: "bug",
        matches: |note| note.has_kind(KIND_BUG),
        place: |_| vec![Bucket::BugFixes],
    },
    Rule {
        name: "uncategorized",
        matches: |_| true,
        place: |_| vec![Bucket::Uncategorized],
    },
];

/// One bucket per SIG label, plus the API changes bucket at most once.
fn categorized_buckets(note: &NoteRecord) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = note.sigs.iter().cloned().map(Bucket::Sig).collect();
    if note.is_api_change() {
        buckets.push(Bucket::ApiChanges);
    }
    buckets
}

/// Find the first rule that claims the note.
#[must_use]
pub fn matching_rule(note: &NoteRecord) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(note))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Compute every bucket a note belongs in.
#[must_use]
pub fn classify(note: &NoteRecord) -> Vec<Bucket> {
    (matching_rule(note).place)(note)
}
