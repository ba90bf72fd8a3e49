//! Line classification
//!
//! Maps each line of the accumulated text to a semantic category.
//! Classification is a pure function of the line's content plus the
//! heading counters - never of network timing or chunk boundaries.
//!
//! Precedence (first match wins): heading levels 1-4, MCQ option,
//! dash bullet, legacy numbered/hash-numbered item, correct-answer line,
//! explanation line, plain text, blank. The MCQ-option check runs before
//! the generic dash rule so `- A) Paris` is still an option.

use once_cell::sync::Lazy;
use regex::Regex;

/// `A) Paris`, `- B) Rome`, `• C) Berlin`
static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-•]?\s*([A-D])\)\s*(.*)$").unwrap());

/// `- point`, possibly indented
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-\s+(.*)$").unwrap());

/// `1. question`, `1) question`, `#1. question`
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#?\d+[.)]\s*(.*)$").unwrap());

/// `Correct Answer: B` anywhere in the line, case-insensitive
static ANSWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)correct\s*answer\s*:").unwrap());

/// `Explanation: ...` anywhere in the line, case-insensitive
static EXPLANATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)explanation\s*:").unwrap());

/// Lowercase Roman labels for level-2 headings; past the table the label
/// falls back to the plain numeral.
const ROMAN: [&str; 10] = ["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];

/// Semantic category of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Heading level 1-4 (4 stands for four-or-more `#`)
    Heading(u8),
    /// Dash-bulleted item
    Bullet,
    /// Legacy numbered / hash-numbered question or item header
    NumberedItem,
    /// MCQ option line with its letter
    McqOption(char),
    /// `Correct Answer:` line
    CorrectAnswer,
    /// `Explanation:` line
    Explanation,
    /// Plain paragraph text
    Plain,
    /// Vertical spacing only
    Blank,
}

/// One classified line, ready for either render target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    /// Original line content, untouched
    pub raw: String,
    /// Display text with markers stripped and labels applied
    pub text: String,
    /// Indent level (0-3), shared by both projections
    pub indent: u8,
}

/// Running heading counters.
///
/// The only state classification carries between lines: a level-1 counter
/// (resets the level-2 counter) and a level-2 counter indexed into the
/// Roman label table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    top: usize,
    sub: usize,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self::default()
    }

    fn sub_label(&self) -> String {
        ROMAN
            .get(self.sub)
            .map_or_else(|| (self.sub + 1).to_string(), |r| (*r).to_string())
    }
}

fn leading_hashes(line: &str) -> usize {
    line.chars().take_while(|&c| c == '#').count()
}

/// Classify one line, updating the heading counters.
pub fn classify(line: &str, state: &mut ClassifierState) -> ClassifiedLine {
    let raw = line.to_string();

    if line.trim().is_empty() {
        return ClassifiedLine {
            kind: LineKind::Blank,
            raw,
            text: String::new(),
            indent: 0,
        };
    }

    let hashes = leading_hashes(line);
    if hashes > 0 {
        let rest = line[hashes..].trim();
        match hashes {
            // A level-1 heading requires whitespace after the single `#`;
            // `#Q1` falls through to the legacy item rule below.
            1 if line[1..].starts_with(char::is_whitespace) => {
                state.top += 1;
                state.sub = 0;
                return ClassifiedLine {
                    kind: LineKind::Heading(1),
                    raw,
                    text: format!("{}. {}", state.top, rest),
                    indent: 0,
                };
            }
            2 => {
                let label = state.sub_label();
                state.sub += 1;
                return ClassifiedLine {
                    kind: LineKind::Heading(2),
                    raw,
                    text: format!("{label}. {rest}"),
                    indent: 1,
                };
            }
            3 => {
                return ClassifiedLine {
                    kind: LineKind::Heading(3),
                    raw,
                    text: format!("- {rest}"),
                    indent: 2,
                };
            }
            n if n >= 4 => {
                return ClassifiedLine {
                    kind: LineKind::Heading(4),
                    raw,
                    text: format!("- {rest}"),
                    indent: 3,
                };
            }
            _ => {}
        }
    }

    if let Some(caps) = OPTION_RE.captures(line) {
        let letter = caps[1].chars().next().unwrap_or('A');
        return ClassifiedLine {
            kind: LineKind::McqOption(letter),
            raw,
            text: format!("{letter}) {}", &caps[2]),
            indent: 1,
        };
    }

    if let Some(caps) = BULLET_RE.captures(line) {
        return ClassifiedLine {
            kind: LineKind::Bullet,
            raw,
            text: format!("- {}", &caps[1]),
            indent: 1,
        };
    }

    // Legacy question/item headers: `1. ...`, `1) ...`, `#1. ...`, and
    // hash-glued headers like `#Q1` (a `#` not followed by whitespace).
    if NUMBERED_RE.is_match(line) || hashes == 1 {
        let text = line.trim_start_matches('#').trim().to_string();
        return ClassifiedLine {
            kind: LineKind::NumberedItem,
            raw,
            text,
            indent: 0,
        };
    }

    if ANSWER_RE.is_match(line) {
        return ClassifiedLine {
            kind: LineKind::CorrectAnswer,
            raw,
            text: line.trim().to_string(),
            indent: 1,
        };
    }

    if EXPLANATION_RE.is_match(line) {
        return ClassifiedLine {
            kind: LineKind::Explanation,
            raw,
            text: line.trim().to_string(),
            indent: 1,
        };
    }

    ClassifiedLine {
        kind: LineKind::Plain,
        raw,
        text: line.trim().to_string(),
        indent: 0,
    }
}

/// Classify a whole document with fresh counters.
pub fn classify_document(text: &str) -> Vec<ClassifiedLine> {
    let mut state = ClassifierState::new();
    text.lines().map(|line| classify(line, &mut state)).collect()
}
