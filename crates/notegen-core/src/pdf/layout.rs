//! Page layout arithmetic
//!
//! Replays classified lines onto fixed-size pages: per-kind font
//! profiles, word wrap to the usable width, a page break whenever the
//! cursor would pass the bottom margin, and an optional title line
//! redrawn at the top of every page.
//!
//! All distances are millimeters from the top-left corner of the page;
//! the writer flips the y axis for PDF space.

use crate::notes::classify::{classify_document, LineKind};
use crate::notes::wrap::wrap_line;

/// Vertical advance for a blank classified line
const BLANK_GAP: f32 = 4.0;
/// Horizontal indent per level
const INDENT_STEP: f32 = 6.0;
/// Title line font size (pt) and advance after it
const TITLE_SIZE: f32 = 16.0;
const TITLE_GAP: f32 = 10.0;
/// Average glyph width as a fraction of the font size
const GLYPH_WIDTH_EM: f32 = 0.5;
/// Point-to-millimeter conversion
const PT_TO_MM: f32 = 0.3528;

/// Fixed page geometry plus the optional per-page title line
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub title: Option<String>,
}

impl Default for PageGeometry {
    /// A4 with 15 mm margins and the fixed export header.
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 15.0,
            title: Some("AI Generated Notes".to_string()),
        }
    }
}

/// Font selection for one line kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontProfile {
    /// Size in points
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    /// RGB, each channel 0.0-1.0
    pub color: (f32, f32, f32),
    /// Vertical advance per physical line (mm)
    pub line_height: f32,
    /// Extra inter-block gap after the last physical line (mm)
    pub gap_after: f32,
}

const BODY_COLOR: (f32, f32, f32) = (0.1, 0.1, 0.1);
const HEADING_COLOR: (f32, f32, f32) = (0.10, 0.15, 0.45);
const ANSWER_COLOR: (f32, f32, f32) = (0.0, 0.4, 0.1);
const MUTED_COLOR: (f32, f32, f32) = (0.35, 0.35, 0.35);

/// Style profile for a line kind, shared across the whole document.
pub fn profile_for(kind: LineKind) -> FontProfile {
    match kind {
        LineKind::Heading(1) => FontProfile {
            size: 15.0,
            bold: true,
            italic: false,
            color: HEADING_COLOR,
            line_height: 8.0,
            gap_after: 2.0,
        },
        LineKind::Heading(2) => FontProfile {
            size: 13.0,
            bold: true,
            italic: false,
            color: HEADING_COLOR,
            line_height: 7.0,
            gap_after: 1.5,
        },
        LineKind::Heading(_) => FontProfile {
            size: 11.5,
            bold: true,
            italic: false,
            color: HEADING_COLOR,
            line_height: 6.5,
            gap_after: 1.0,
        },
        LineKind::NumberedItem => FontProfile {
            size: 11.0,
            bold: true,
            italic: false,
            color: BODY_COLOR,
            line_height: 6.0,
            gap_after: 1.0,
        },
        LineKind::CorrectAnswer => FontProfile {
            size: 10.0,
            bold: true,
            italic: false,
            color: ANSWER_COLOR,
            line_height: 5.5,
            gap_after: 1.5,
        },
        LineKind::Explanation => FontProfile {
            size: 9.5,
            bold: false,
            italic: true,
            color: MUTED_COLOR,
            line_height: 5.0,
            gap_after: 0.0,
        },
        LineKind::Bullet | LineKind::McqOption(_) | LineKind::Plain | LineKind::Blank => {
            FontProfile {
                size: 10.0,
                bold: false,
                italic: false,
                color: BODY_COLOR,
                line_height: 5.5,
                gap_after: 0.0,
            }
        }
    }
}

/// One positioned run of text. `y` is the baseline offset from the top
/// of the page in millimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: (f32, f32, f32),
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// The exportable document: an ordered sequence of fixed-size pages
#[derive(Debug, Clone)]
pub struct PaginatedDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

fn title_run(geometry: &PageGeometry) -> Option<TextRun> {
    geometry.title.as_ref().map(|title| TextRun {
        x: geometry.margin,
        y: geometry.margin,
        text: title.clone(),
        size: TITLE_SIZE,
        bold: true,
        italic: false,
        color: BODY_COLOR,
    })
}

/// Estimated character budget for a run at `size` points in `width` mm.
fn char_budget(width: f32, size: f32) -> usize {
    let glyph = size * GLYPH_WIDTH_EM * PT_TO_MM;
    ((width / glyph).floor() as usize).max(1)
}

/// Lay the accumulated text out onto pages.
pub fn paginate(text: &str, geometry: PageGeometry) -> PaginatedDocument {
    let lines = classify_document(text);
    let bottom = geometry.height - geometry.margin;

    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut cursor = geometry.margin;
    if let Some(run) = title_run(&geometry) {
        page.runs.push(run);
        cursor += TITLE_GAP;
    }

    // An Explanation: line opens a block; following plain lines keep the
    // muted style until a blank line or a heading-like line closes it.
    // Classification itself is untouched - this is styling only.
    let mut in_explanation = false;

    for line in &lines {
        match line.kind {
            LineKind::Blank => {
                cursor += BLANK_GAP;
                in_explanation = false;
                continue;
            }
            LineKind::Heading(_) | LineKind::NumberedItem => in_explanation = false,
            LineKind::Explanation => in_explanation = true,
            _ => {}
        }

        let profile = if line.kind == LineKind::Plain && in_explanation {
            profile_for(LineKind::Explanation)
        } else {
            profile_for(line.kind)
        };

        let x = geometry.margin + f32::from(line.indent) * INDENT_STEP;
        let usable = geometry.width - geometry.margin - x;
        let budget = char_budget(usable, profile.size);

        for wrapped in wrap_line(&line.text, budget) {
            if cursor > bottom {
                pages.push(std::mem::take(&mut page));
                cursor = geometry.margin;
                if let Some(run) = title_run(&geometry) {
                    page.runs.push(run);
                    cursor += TITLE_GAP;
                }
            }
            page.runs.push(TextRun {
                x,
                y: cursor,
                text: wrapped,
                size: profile.size,
                bold: profile.bold,
                italic: profile.italic,
                color: profile.color,
            });
            cursor += profile.line_height;
        }
        cursor += profile.gap_after;
    }

    pages.push(page);
    PaginatedDocument { geometry, pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PageGeometry {
        PageGeometry {
            title: None,
            ..PageGeometry::default()
        }
    }

    #[test]
    fn test_single_page_for_short_text() {
        let doc = paginate("# Title\nSome body text.", geometry());
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].runs.len(), 2);
        assert_eq!(doc.pages[0].runs[0].text, "1. Title");
        assert!(doc.pages[0].runs[0].bold);
    }

    #[test]
    fn test_page_break_on_overflow() {
        // Enough plain lines to overflow one A4 page of 5.5 mm advances
        let text = (0..60).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let doc = paginate(&text, geometry());
        assert_eq!(doc.pages.len(), 2);
        assert!(!doc.pages[1].runs.is_empty());
    }

    #[test]
    fn test_no_run_placed_past_bottom_margin() {
        let text = (0..500).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let geo = geometry();
        let bottom = geo.height - geo.margin;
        let doc = paginate(&text, geo);
        for page in &doc.pages {
            for run in &page.runs {
                assert!(run.y <= bottom, "run at y={} past bottom {bottom}", run.y);
            }
        }
    }

    #[test]
    fn test_title_redrawn_on_every_page() {
        let text = (0..120).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let doc = paginate(&text, PageGeometry::default());
        assert!(doc.pages.len() >= 2);
        for page in &doc.pages {
            assert_eq!(page.runs[0].text, "AI Generated Notes");
            assert_eq!(page.runs[0].size, 16.0);
        }
    }

    #[test]
    fn test_blank_line_advances_without_run() {
        let with_blank = paginate("a\n\nb", geometry());
        let runs = &with_blank.pages[0].runs;
        assert_eq!(runs.len(), 2);
        assert!((runs[1].y - runs[0].y - 5.5 - BLANK_GAP).abs() < 0.01);
    }

    #[test]
    fn test_long_paragraph_wraps() {
        let text = "word ".repeat(80);
        let doc = paginate(text.trim(), geometry());
        assert!(doc.pages[0].runs.len() > 1);
        // Wrapped runs share the x position and stack downward
        let runs = &doc.pages[0].runs;
        assert_eq!(runs[0].x, runs[1].x);
        assert!(runs[1].y > runs[0].y);
    }

    #[test]
    fn test_explanation_block_styling_carries_to_plain_lines() {
        let text = "Explanation: first line\nsecond plain line\n\nback to normal";
        let doc = paginate(text, geometry());
        let runs = &doc.pages[0].runs;
        assert!(runs[0].italic);
        assert!(runs[1].italic, "plain line inside the block stays muted");
        assert!(!runs[2].italic, "blank line closes the block");
    }

    #[test]
    fn test_heading_closes_explanation_block() {
        let text = "Explanation: why\n# Next Topic\nprose";
        let doc = paginate(text, geometry());
        let runs = &doc.pages[0].runs;
        assert!(!runs[1].italic);
        assert!(!runs[2].italic);
    }

    #[test]
    fn test_indent_applied_per_level() {
        let doc = paginate("# H\n## S\n### D\nA) opt", geometry());
        let runs = &doc.pages[0].runs;
        assert_eq!(runs[0].x, 15.0);
        assert_eq!(runs[1].x, 15.0 + INDENT_STEP);
        assert_eq!(runs[2].x, 15.0 + 2.0 * INDENT_STEP);
        assert_eq!(runs[3].x, 15.0 + INDENT_STEP);
    }

    #[test]
    fn test_classification_parity_with_inline_projection() {
        use crate::notes::inline::render_inline;
        let text = "# T\n## S\n- b\n1. Q\nA) x\nB) y\nCorrect Answer: A\nExplanation: z\n\nplain";
        let classified = crate::notes::classify::classify_document(text);
        let inline = render_inline(text);
        assert_eq!(classified.len(), inline.len());
        for (c, i) in classified.iter().zip(inline.iter()) {
            assert_eq!(c.kind, i.kind);
        }
    }

    #[test]
    fn test_overlong_word_overflows_rather_than_splits() {
        let word = "x".repeat(400);
        let doc = paginate(&word, geometry());
        assert_eq!(doc.pages[0].runs.len(), 1);
        assert_eq!(doc.pages[0].runs[0].text.len(), 400);
    }
}
