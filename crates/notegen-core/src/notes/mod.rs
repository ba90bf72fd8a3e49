//! Line grammar shared by both render targets
//!
//! Classification lives here once; the inline (live display) projection
//! and the paginated PDF projection both consume [`classify::ClassifiedLine`]
//! and differ only in style mapping.

pub mod classify;
pub mod inline;
pub mod wrap;

pub use classify::{classify_document, ClassifiedLine, ClassifierState, LineKind};
pub use inline::{render_inline, ColorRole, Span, SpanStyle, StyledLine};
