//! notegen-core - streaming ingest, line classification, and PDF export
//!
//! The pipeline: network bytes -> [`ai::sse::SseAccumulator`] -> accumulated
//! text -> [`notes`] classification -> either a structured inline tree for
//! live display or a paginated document for PDF export. Both projections
//! share the same line grammar and must never diverge on classification.

pub mod ai;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod notes;
pub mod pdf;

pub use ai::client::NotesClient;
pub use ai::types::{Attachment, FileType, Mode};
pub use config::Config;
pub use error::{NotesError, Result};
