//! Error taxonomy for the notes pipeline
//!
//! Every variant is terminal at the point of occurrence - nothing here is
//! retried automatically. Partial output accumulated before a failure stays
//! with the caller (still copyable/exportable).

use thiserror::Error;

/// Convenience alias for results in this crate
pub type Result<T> = std::result::Result<T, NotesError>;

/// Terminal failures surfaced to the user as a single notification
#[derive(Debug, Error)]
pub enum NotesError {
    /// Upstream returned HTTP 429 before streaming began
    #[error("rate limit exceeded (HTTP 429)")]
    RateLimited,

    /// Upstream returned HTTP 402 before streaming began
    #[error("payment required (HTTP 402)")]
    PaymentRequired,

    /// Any other non-2xx status, missing body, or mid-stream failure
    #[error("failed to generate notes: {0}")]
    GenerationFailed(String),

    /// OCR extraction failed for one uploaded file
    #[error("failed to extract text from {file}: {reason}")]
    ExtractionFailed { file: String, reason: String },

    /// PDF construction or save threw
    #[error("failed to export PDF: {0}")]
    ExportFailed(String),

    /// Clipboard write failed
    #[error("failed to copy to clipboard: {0}")]
    ClipboardFailed(String),
}

impl NotesError {
    /// Map a non-success HTTP status to the generation error taxonomy.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            429 => Self::RateLimited,
            402 => Self::PaymentRequired,
            code => Self::GenerationFailed(format!("unexpected HTTP status {code}")),
        }
    }

    /// The user-facing notification text for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            Self::PaymentRequired => {
                "Payment required. Please add funds to your workspace.".to_string()
            }
            Self::GenerationFailed(_) => "Failed to generate notes. Please try again.".to_string(),
            Self::ExtractionFailed { file, .. } => {
                format!("Failed to extract text from {file}. It was skipped.")
            }
            Self::ExportFailed(_) => "Failed to generate PDF. Try on PC for best results.".to_string(),
            Self::ClipboardFailed(_) => "Failed to copy to clipboard.".to_string(),
        }
    }
}
