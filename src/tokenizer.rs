// src/tokenizer.rs
//
// Streaming tag/text scanner for blog-post HTML fragments.
//
// - Splits the input into start tags, end tags, text runs, comments and
//   declarations, each tagged with its starting byte offset.
// - Tag ends are found quote-aware, so `>` inside attribute values is fine.
// - A '<' that does not open markup is plain text. An unterminated tag or
//   comment runs to end of input as text.
// - Start tags written `<x/>` or naming a void element are self-closing.
// - <script> and <style> content is raw text up to the matching end tag.
// - UTF-8 safe: scanning is byte-oriented but every delimiter is ASCII, so
//   slices always land on char boundaries.

use memchr::{memchr, memchr_iter, memmem, memrchr};

/* =============================== Core sets =============================== */

fn is_void(name: &str) -> bool {
    matches_ignore_ascii_case(
        name,
        &[
            "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
            "source", "track", "wbr",
        ],
    )
}

fn is_raw_text(name: &str) -> bool {
    matches_ignore_ascii_case(name, &["script", "style"])
}

/* ============================ Utility predicates ========================= */

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r'
}

fn matches_ignore_ascii_case(name: &str, set: &[&str]) -> bool {
    set.iter().any(|s| name.eq_ignore_ascii_case(s))
}

/* ================================ Events ================================= */

/// A start or end tag as it appeared in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag name as written in the source.
    pub name: &'a str,
    /// Exact source text, from `<` to `>` inclusive.
    pub raw: &'a str,
    /// `<x />` syntax, or a void element such as `<br>`.
    pub self_closing: bool,
}

impl Tag<'_> {
    /// Case-insensitive name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn lowercase_name(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    StartTag(Tag<'a>),
    EndTag(Tag<'a>),
    Text(&'a str),
    Comment(&'a str),
    /// `<!DOCTYPE ...>`, `<![CDATA[...]>`, `<?...?>` and friends.
    Declaration(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Byte offset of the first character of the event in the source.
    pub offset: usize,
    pub event: Event<'a>,
}

/* =============================== Tag parsing ============================= */

/// Find the '>' for a tag starting at `i` (s[i] == '<'), being quote-aware.
fn find_tag_end(s: &[u8], mut i: usize) -> Option<usize> {
    let n = s.len();
    i += 1;
    let mut quote: u8 = 0;
    while i < n {
        let b = s[i];
        if quote != 0 {
            if b == quote {
                quote = 0;
            }
        } else if b == b'"' || b == b'\'' {
            quote = b;
        } else if b == b'>' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Extract the tag name and self-closing syntax from raw `<...>` text.
fn parse_tag<'a>(raw: &'a str, is_end: bool) -> Tag<'a> {
    let tag = raw.as_bytes();
    let n = tag.len();
    let mut i = if is_end { 2 } else { 1 };
    let start = i;
    while i < n && is_name_char(tag[i]) {
        i += 1;
    }
    let name = &raw[start..i];

    // self-closing? check before '>'
    let mut j = n - 1;
    while j > 0 && is_ws(tag[j - 1]) {
        j -= 1;
    }
    let self_closing = !is_end && ((j >= 2 && tag[j - 1] == b'/') || is_void(name));

    Tag {
        name,
        raw,
        self_closing,
    }
}

/// Whether `rest` (starting at a '<') looks like the opening of a tag,
/// comment or declaration, terminated or not.
fn opens_markup(rest: &[u8]) -> bool {
    match rest.get(1).copied() {
        Some(b'!') | Some(b'?') => true,
        Some(b'/') => rest.get(2).is_some_and(u8::is_ascii_alphabetic),
        Some(b) => b.is_ascii_alphabetic(),
        None => false,
    }
}

/// Position of the `</name` that closes a raw-text element, or the end of
/// input when it is never closed.
fn find_raw_text_end(s: &[u8], from: usize, name: &str) -> usize {
    let name = name.as_bytes();
    let mut j = from;
    while let Some(pos) = memchr(b'<', &s[j..]).map(|off| j + off) {
        let name_start = pos + 2;
        let name_end = name_start + name.len();
        if s.get(pos + 1) == Some(&b'/')
            && name_end <= s.len()
            && s[name_start..name_end].eq_ignore_ascii_case(name)
            && s.get(name_end).map_or(true, |&b| !is_name_char(b))
        {
            return pos;
        }
        j = pos + 1;
    }
    s.len()
}

/* ============================== Tokenizer ================================ */

/// Iterator over the [`Token`]s of an HTML fragment.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    /// Name of the open <script>/<style> element whose content is raw text.
    raw_text: Option<&'a str>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            raw_text: None,
        }
    }

    /// Try to read markup starting at `i` (s[i] == '<'). Returns the event and
    /// the index just past it, or `None` if the '<' is literal text.
    fn markup_at(&mut self, i: usize) -> Option<(Event<'a>, usize)> {
        let src = self.src;
        let s = src.as_bytes();
        let rest = &s[i..];

        if rest.starts_with(b"<!--") {
            let end = memmem::find(&rest[4..], b"-->")? + i + 4 + 3;
            return Some((Event::Comment(&src[i..end]), end));
        }

        match rest.get(1).copied() {
            Some(b'!') | Some(b'?') => {
                let end = find_tag_end(s, i)? + 1;
                Some((Event::Declaration(&src[i..end]), end))
            }
            Some(b'/') if rest.get(2).is_some_and(u8::is_ascii_alphabetic) => {
                let end = find_tag_end(s, i)? + 1;
                Some((Event::EndTag(parse_tag(&src[i..end], true)), end))
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let end = find_tag_end(s, i)? + 1;
                let tag = parse_tag(&src[i..end], false);
                if !tag.self_closing && is_raw_text(tag.name) {
                    self.raw_text = Some(tag.name);
                }
                Some((Event::StartTag(tag), end))
            }
            _ => None,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let src = self.src;
        let s = src.as_bytes();
        let n = s.len();
        let i = self.pos;
        if i >= n {
            return None;
        }

        // Inside <script>/<style>: everything up to the matching end tag is text.
        if let Some(name) = self.raw_text.take() {
            let end = find_raw_text_end(s, i, name);
            if end > i {
                self.pos = end;
                return Some(Token {
                    offset: i,
                    event: Event::Text(&src[i..end]),
                });
            }
        }

        if s[i] == b'<' {
            if let Some((event, next)) = self.markup_at(i) {
                self.pos = next;
                return Some(Token { offset: i, event });
            }
            if opens_markup(&s[i..]) {
                // Unterminated tag or comment: the rest of the input is text.
                self.pos = n;
                return Some(Token {
                    offset: i,
                    event: Event::Text(&src[i..]),
                });
            }
        }

        // Text run up to the next '<'
        let next_lt = memchr(b'<', &s[i + 1..]).map_or(n, |off| i + 1 + off);
        self.pos = next_lt;
        Some(Token {
            offset: i,
            event: Event::Text(&src[i..next_lt]),
        })
    }
}

/* =============================== Positions =============================== */

/// 1-based line number and 0-based character column of a byte offset.
pub fn line_col(src: &str, offset: usize) -> (usize, usize) {
    let before = &src.as_bytes()[..offset];
    let line = memchr_iter(b'\n', before).count() + 1;
    let line_start = memrchr(b'\n', before).map_or(0, |x| x + 1);
    (line, src[line_start..offset].chars().count())
}

/// The full source line (without its newline) containing a byte offset.
pub fn line_at(src: &str, offset: usize) -> &str {
    let s = src.as_bytes();
    let start = memrchr(b'\n', &s[..offset]).map_or(0, |x| x + 1);
    let end = memchr(b'\n', &s[offset..]).map_or(s.len(), |x| offset + x);
    &src[start..end]
}
