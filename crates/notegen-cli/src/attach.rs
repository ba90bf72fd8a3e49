//! Attachment loading for the CLI
//!
//! Reads each `--attach` file, sniffs pdf/image from the extension, and
//! base64-encodes it for the extraction endpoint. Unsupported extensions
//! are rejected up front so they never reach the network.

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use notegen_core::{Attachment, FileType};

/// MIME type and file class for a supported extension.
fn sniff(path: &Path) -> Option<(&'static str, FileType)> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(("application/pdf", FileType::Pdf)),
        "png" => Some(("image/png", FileType::Image)),
        "jpg" | "jpeg" => Some(("image/jpeg", FileType::Image)),
        "webp" => Some(("image/webp", FileType::Image)),
        _ => None,
    }
}

/// Load one attachment from disk.
pub fn load(path: &Path) -> Result<Attachment> {
    let Some((mime_type, file_type)) = sniff(path) else {
        bail!(
            "unsupported attachment type: {} (expected pdf, png, jpg, or webp)",
            path.display()
        );
    };
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read attachment {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(Attachment {
        name,
        data_base64: STANDARD.encode(&data),
        mime_type: mime_type.to_string(),
        file_type,
    })
}
