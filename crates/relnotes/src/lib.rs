//! `relnotes` - Release notes classification and Markdown rendering
//!
//! This library sorts pull request release notes into a structured
//! [`Document`] and renders that document as a Markdown changelog, optionally
//! prefixed by a downloads table with SHA-512 checksums of the release
//! artifacts.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod note;
pub mod prettify;
pub mod render;

pub use config::Config;
pub use document::{build_document, Document};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use note::{NoteId, NoteRecord, NotesInput, ReleaseNotes, ReleaseNotesHistory};
pub use render::render_markdown;
