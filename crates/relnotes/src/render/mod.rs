//! Markdown rendering of a [`Document`].
//!
//! The output is deterministic: sections appear in a fixed order, SIG
//! sub-sections are sorted by raw label and multi-SIG headers are sorted
//! alphabetically.

pub mod downloads;

use std::io::Write;

use tracing::debug;

use crate::document::Document;
use crate::error::Result;
use crate::prettify::prettify;

pub use downloads::{sha512_file, url_prefix, write_downloads_table, PRODUCTION_BUCKET};

const BULLET: &str = "- ";

/// Render a document as Markdown.
///
/// When `artifact_dir` is non-empty, a downloads table for the artifacts in
/// it is written first. Rendering stops at the first failure; anything
/// already written stays written.
///
/// # Errors
///
/// Returns [`Error::MissingReleaseTags`](crate::Error::MissingReleaseTags)
/// if a downloads table is requested without both tags, and an I/O class
/// error if an artifact can't be read or the writer fails.
pub fn render_markdown<W: Write>(
    w: &mut W,
    doc: &Document,
    bucket: &str,
    artifact_dir: &str,
    previous_tag: &str,
    new_tag: &str,
) -> Result<()> {
    write_downloads_table(w, bucket, artifact_dir, previous_tag, new_tag)?;

    let mut md = MarkdownWriter { w };

    md.section("## Action Required", &doc.action_required)?;
    md.section("## New Features", &doc.new_features)?;
    md.section("### API Changes", &doc.api_changes)?;

    if !doc.duplicates.is_empty() {
        md.write("### Notes from Multiple SIGs\n\n")?;
        for (header, notes) in &doc.duplicates {
            md.subsection(header, notes)?;
        }
        md.write("\n")?;
    }

    if !doc.sigs.is_empty() {
        md.write("### Notes from Individual SIGs\n\n")?;
        for (sig, notes) in &doc.sigs {
            md.subsection(&format!("SIG {}", prettify(sig)), notes)?;
        }
        md.write("\n\n")?;
    }

    md.section("### Bug Fixes", &doc.bug_fixes)?;
    md.section("### Other Notable Changes", &doc.uncategorized)?;

    debug!(entries = doc.entry_count(), "Rendered release notes");
    Ok(())
}

/// Bulleted note output on top of a writer.
struct MarkdownWriter<'a, W: Write> {
    w: &'a mut W,
}

impl<W: Write> MarkdownWriter<'_, W> {
    fn write(&mut self, s: &str) -> Result<()> {
        self.w.write_all(s.as_bytes())?;
        Ok(())
    }

    fn note(&mut self, note: &str) -> Result<()> {
        if !note.starts_with(BULLET) {
            self.write(BULLET)?;
        }
        self.write(note)?;
        self.write("\n")
    }

    fn notes(&mut self, notes: &[String]) -> Result<()> {
        notes.iter().try_for_each(|note| self.note(note))
    }

    /// A top-level section, skipped when there is nothing to list.
    fn section(&mut self, heading: &str, notes: &[String]) -> Result<()> {
        if notes.is_empty() {
            return Ok(());
        }
        self.write(&format!("{heading}\n\n"))?;
        self.notes(notes)?;
        self.write("\n\n")
    }

    fn subsection(&mut self, heading: &str, notes: &[String]) -> Result<()> {
        self.write(&format!("#### {heading}\n\n"))?;
        self.notes(notes)?;
        self.write("\n")
    }
}
