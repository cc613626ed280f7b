// src/wrap.rs
//
// Line wrapping for preformatted text.
//
// - Long lines break after the last space, tab, '(', ':' or '/' that fits in
//   the allowed width.
// - Continuation lines are indented and get a narrower budget, so they line
//   up under the first.
// - A line with no break point in range is left long, never split mid-word.
// - Widths count chars, not bytes.

/// Wrap widths, in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wrap {
    /// Maximum length of the first segment of a line.
    pub width: usize,
    /// Indent added to continuation segments; they may hold `width - indent`
    /// characters after it.
    pub indent: usize,
}

impl Wrap {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    fn continuation_width(&self) -> usize {
        self.width.saturating_sub(self.indent)
    }
}

impl Default for Wrap {
    fn default() -> Self {
        Self {
            width: 80,
            indent: 4,
        }
    }
}

/* ================================ Wrapping =============================== */

#[inline]
fn is_break(c: char) -> bool {
    matches!(c, ' ' | '\t' | '(' | ':' | '/')
}

/// Split one logical line into wrapped segments. Never returns an empty list.
pub fn split_line(line: &str, wrap: Wrap) -> Vec<String> {
    let mut result = Vec::new();
    let mut rest = line;
    let mut continuation = false;

    while !rest.is_empty() {
        let (max, prefix) = if continuation {
            (wrap.continuation_width(), " ".repeat(wrap.indent))
        } else {
            (wrap.width, String::new())
        };

        // Byte index of the first char past the budget, if the tail is too long.
        let Some((cut, _)) = rest.char_indices().nth(max) else {
            result.push(prefix + rest);
            break;
        };

        // Break chars are all ASCII, so `pos + 1` stays on a char boundary.
        match rest[..cut].rfind(is_break) {
            Some(pos) => {
                result.push(prefix + &rest[..=pos]);
                rest = &rest[pos + 1..];
                continuation = true;
            }
            None => {
                result.push(prefix + rest);
                break;
            }
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }
    result
}

/// Wrap every line of `text`, dropping leading and trailing blank lines of
/// the result.
pub fn wrap_lines(text: &str, wrap: Wrap) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    for line in text.split('\n') {
        for segment in split_line(line, wrap) {
            out.push_str(&segment);
            out.push('\n');
        }
    }
    out.trim_matches('\n').to_string()
}
