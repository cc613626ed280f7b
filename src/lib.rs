// src/lib.rs
//
// Shared code for the blogtext and diary-days tools.
//
// - reflow: lays out a hand-written HTML fragment the way the blog wants it,
//   escaping <pre>/<tt> content and wrapping preformatted lines.
// - validate: checks that the result has balanced tags.
// - dates: counts weekday and weekend diary entries.

pub mod dates;
pub mod reflow;
pub mod tokenizer;
pub mod validate;
pub mod wrap;
