//! Clipboard export
//!
//! The accumulated text goes to the clipboard verbatim - classification
//! and styling are display concerns only.

use crate::error::{NotesError, Result};

/// Write `text` to the system clipboard. No retry on failure.
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| NotesError::ClipboardFailed(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| NotesError::ClipboardFailed(e.to_string()))
}
