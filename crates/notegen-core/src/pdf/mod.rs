//! Paginated document projection and PDF export
//!
//! [`layout`] is pure arithmetic: classified lines in, positioned text
//! runs on fixed-size pages out. [`writer`] maps the result to actual
//! PDF bytes.

pub mod layout;
pub mod writer;

pub use layout::{paginate, Page, PageGeometry, PaginatedDocument, TextRun};
pub use writer::{export_pdf, pdf_bytes, DEFAULT_PDF_FILE};
