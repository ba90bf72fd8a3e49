//! PDF serialization
//!
//! Maps a [`PaginatedDocument`] to real PDF bytes with printpdf's builtin
//! Helvetica family. Layout is already done; this module only converts
//! coordinates (top-down mm to PDF's bottom-up space) and picks fonts.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rgb};
use tracing::info;

use super::layout::PaginatedDocument;
use crate::error::{NotesError, Result};

/// Fixed output file name used when the caller does not pick one
pub const DEFAULT_PDF_FILE: &str = "notes.pdf";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl Fonts {
    fn select(&self, bold: bool, italic: bool) -> &IndirectFontRef {
        match (bold, italic) {
            (true, true) => &self.bold_italic,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (false, false) => &self.regular,
        }
    }
}

fn build(document: &PaginatedDocument) -> Result<printpdf::PdfDocumentReference> {
    let geometry = &document.geometry;
    let (doc, first_page, first_layer) = PdfDocument::new(
        "AI Generated Notes",
        Mm(geometry.width),
        Mm(geometry.height),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| NotesError::ExportFailed(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| NotesError::ExportFailed(e.to_string()))?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| NotesError::ExportFailed(e.to_string()))?,
        bold_italic: doc
            .add_builtin_font(BuiltinFont::HelveticaBoldOblique)
            .map_err(|e| NotesError::ExportFailed(e.to_string()))?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(geometry.width), Mm(geometry.height), "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };

        for run in &page.runs {
            let (r, g, b) = run.color;
            layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
            layer.use_text(
                run.text.clone(),
                run.size,
                Mm(run.x),
                // Layout measures from the top edge, PDF from the bottom
                Mm(geometry.height - run.y),
                fonts.select(run.bold, run.italic),
            );
        }
    }

    Ok(doc)
}

/// Serialize the document to PDF bytes.
pub fn pdf_bytes(document: &PaginatedDocument) -> Result<Vec<u8>> {
    build(document)?
        .save_to_bytes()
        .map_err(|e| NotesError::ExportFailed(e.to_string()))
}

/// Build and save the document to `path`.
pub fn export_pdf(document: &PaginatedDocument, path: &Path) -> Result<()> {
    let doc = build(document)?;
    let file = File::create(path).map_err(|e| NotesError::ExportFailed(e.to_string()))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| NotesError::ExportFailed(e.to_string()))?;
    info!("saved PDF to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::layout::{paginate, PageGeometry};

    #[test]
    fn test_bytes_are_pdf() {
        let doc = paginate("# Title\nBody text.", PageGeometry::default());
        let bytes = pdf_bytes(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_PDF_FILE);
        let doc = paginate("1. Q\nA) x\nCorrect Answer: A", PageGeometry::default());
        export_pdf(&doc, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_multi_page_document_exports() {
        let text = (0..200).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let doc = paginate(&text, PageGeometry::default());
        assert!(doc.pages.len() >= 2);
        assert!(pdf_bytes(&doc).is_ok());
    }
}
