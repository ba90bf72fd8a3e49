//! Word wrapping for the paginated renderer
//!
//! Width is measured in characters; the PDF layout converts a usable
//! width in millimeters into a character budget via its glyph-width
//! estimate. A single word wider than the budget is kept whole - a
//! visually overflowing line beats a corrupted word.

/// Wrap a single line at word boundaries to fit within `max_chars`.
///
/// Empty input returns a single empty string so the caller still
/// advances the cursor by one line.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in line.split_whitespace() {
        let word_width = word.chars().count();

        if current.is_empty() {
            // First word on the line - use it even if too long
            current = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            result.push(current);
            current = word.to_string();
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_untouched() {
        assert_eq!(wrap_line("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(wrap_line("hello world", 11), vec!["hello world"]);
    }

    #[test]
    fn test_breaks_at_words() {
        assert_eq!(wrap_line("hello world foo", 10), vec!["hello", "world foo"]);
    }

    #[test]
    fn test_overlong_word_not_split() {
        assert_eq!(
            wrap_line("see deoxyribonucleic acid", 10),
            vec!["see", "deoxyribonucleic", "acid"]
        );
    }

    #[test]
    fn test_zero_width_passthrough() {
        assert_eq!(wrap_line("anything", 0), vec!["anything"]);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(wrap_line("", 10), vec![""]);
    }
}
