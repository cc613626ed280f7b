// src/validate.rs
//
// Tag-balance check for generated output.
//
// - Re-tokenizes a document and reports every end tag that does not close
//   the element on top of the stack, with line, column and source line.
// - Self-closing and void tags never touch the stack.
// - Nothing is repaired. The stack is popped on a mismatch too.

use std::fmt;

use crate::tokenizer::{line_at, line_col, Event, Tokenizer};

/// An end tag that did not match the innermost open element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Name of the offending end tag.
    pub closing: String,
    /// Innermost open element, if there was one.
    pub expected: Option<String>,
    /// 1-based.
    pub line: usize,
    /// 0-based, in characters.
    pub column: usize,
    pub source_line: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Error with tag \"{}/{}\" on line {}, character {}",
            self.closing,
            self.expected.as_deref().unwrap_or("None"),
            self.line,
            self.column
        )?;
        f.write_str(&self.source_line)
    }
}

pub fn validate(text: &str) -> Vec<Mismatch> {
    let mut stack: Vec<String> = Vec::new();
    let mut mismatches = Vec::new();

    for token in Tokenizer::new(text) {
        match token.event {
            Event::StartTag(tag) if !tag.self_closing => stack.push(tag.lowercase_name()),
            Event::EndTag(tag) => {
                let closing = tag.lowercase_name();
                let expected = stack.pop();
                if expected.as_deref() != Some(closing.as_str()) {
                    let (line, column) = line_col(text, token.offset);
                    log::debug!("unbalanced </{closing}> at {line}:{column}");
                    mismatches.push(Mismatch {
                        closing,
                        expected,
                        line,
                        column,
                        source_line: line_at(text, token.offset).to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn balanced_document_is_clean() {
        let text = "<div class=\"quote\">\n<p>a <b>b</b><br />\n<img src=x></p>\n</div>\n";
        assert_eq!(validate(text), vec![]);
    }

    #[test]
    fn escaped_markup_is_not_a_tag() {
        assert_eq!(validate("<pre>\n&lt;/div&gt;\n</pre>"), vec![]);
    }

    #[test]
    fn reports_stray_end_tag() {
        let text = "<p>one</p>\n<p>two\n  still two</div></p>\n";
        let found = validate(text);
        assert_eq!(
            found,
            vec![
                Mismatch {
                    closing: "div".into(),
                    expected: Some("p".into()),
                    line: 3,
                    column: 11,
                    source_line: "  still two</div></p>".into(),
                },
                Mismatch {
                    closing: "p".into(),
                    expected: None,
                    line: 3,
                    column: 17,
                    source_line: "  still two</div></p>".into(),
                },
            ]
        );
        assert_eq!(
            found[0].to_string(),
            "Error with tag \"div/p\" on line 3, character 11\n  still two</div></p>"
        );
        assert_eq!(
            found[1].to_string().lines().next(),
            Some("Error with tag \"p/None\" on line 3, character 17")
        );
    }

    #[test]
    fn single_unmatched_close() {
        let found = validate("<p>x</p>\n</div>\n<p>y</p>");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].closing, "div");
        assert_eq!(found[0].expected, None);
        assert_eq!(found[0].line, 2);
    }
}
