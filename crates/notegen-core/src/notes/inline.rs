//! Inline (live display) projection
//!
//! Builds a safe structured tree of typed spans for the UI layer to
//! render - never markup strings. Classification decisions come from
//! [`super::classify`] and are identical to the paginated projection.

use super::classify::{classify_document, ClassifiedLine, LineKind};

/// Color role resolved by the UI's theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Heading,
    SubHeading,
    Item,
    Body,
    Answer,
    Explanation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub role: ColorRole,
}

/// One run of uniformly-styled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

/// One rendered line of the live view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub kind: LineKind,
    pub indent: u8,
    pub spans: Vec<Span>,
}

fn style_for(kind: LineKind) -> SpanStyle {
    match kind {
        LineKind::Heading(1) => SpanStyle {
            bold: true,
            italic: false,
            role: ColorRole::Heading,
        },
        LineKind::Heading(_) => SpanStyle {
            bold: true,
            italic: false,
            role: ColorRole::SubHeading,
        },
        LineKind::NumberedItem => SpanStyle {
            bold: true,
            italic: false,
            role: ColorRole::Item,
        },
        LineKind::CorrectAnswer => SpanStyle {
            bold: true,
            italic: false,
            role: ColorRole::Answer,
        },
        LineKind::Explanation => SpanStyle {
            bold: false,
            italic: true,
            role: ColorRole::Explanation,
        },
        LineKind::Bullet | LineKind::McqOption(_) | LineKind::Plain | LineKind::Blank => {
            SpanStyle {
                bold: false,
                italic: false,
                role: ColorRole::Body,
            }
        }
    }
}

fn spans_for(line: &ClassifiedLine) -> Vec<Span> {
    if line.kind == LineKind::Blank {
        return Vec::new();
    }
    let style = style_for(line.kind);

    // Answer and explanation lines get their label emphasized separately
    // from the remainder of the line.
    if matches!(line.kind, LineKind::CorrectAnswer | LineKind::Explanation) {
        if let Some(colon) = line.text.find(':') {
            let (label, rest) = line.text.split_at(colon + 1);
            let mut spans = vec![Span {
                text: label.to_string(),
                style: SpanStyle {
                    bold: true,
                    ..style
                },
            }];
            if !rest.is_empty() {
                spans.push(Span {
                    text: rest.to_string(),
                    style,
                });
            }
            return spans;
        }
    }

    vec![Span {
        text: line.text.clone(),
        style,
    }]
}

/// Project the accumulated text into styled lines for live display.
pub fn render_inline(text: &str) -> Vec<StyledLine> {
    classify_document(text)
        .into_iter()
        .map(|line| StyledLine {
            kind: line.kind,
            indent: line.indent,
            spans: spans_for(&line),
        })
        .collect()
}
