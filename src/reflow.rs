// src/reflow.rs
//
// Blog-post cleanup: turns a hand-written HTML fragment into the layout the
// blog expects.
//
// - Prose is gathered into a paragraph buffer and flushed paragraph by
//   paragraph, with `<br />` separators chosen by what the paragraph is
//   (day heading, container div, list) and what follows it.
// - <pre> blocks lose build-environment path prefixes, are wrapped to the
//   configured width and escaped.
// - <tt> spans have their text escaped verbatim. Markup met inside a span
//   still goes to the paragraph buffer. A <tt> inside <pre> is ordinary markup.
// - Outside <tt>/<pre>, em-dashes and double quotes become named references.
//   <pre> text is kept as written since the whole block is escaped.
// - Comments and declarations are dropped.
//
// State lives in `BlogParser` and moves between three modes:
//
//   Normal       --<pre>-->  Preformatted   (pending prose flushed first)
//   Normal       --<tt>--->  LiteralSpan
//   LiteralSpan  --<pre>-->  Preformatted   (open span committed first)
//   Preformatted --</pre>->  Normal         (block emitted)
//   LiteralSpan  --</tt>-->  Normal         (span committed to the paragraph)
//
// Every other tag leaves the mode alone.

use std::mem;
use std::sync::LazyLock;

use html_escape::{decode_html_entities, encode_quoted_attribute};
use regex::{NoExpand, Regex};

use crate::tokenizer::{Event, Tag, Tokenizer};
use crate::wrap::{wrap_lines, Wrap};

/* =============================== Constants =============================== */

const DAY_HEADING: &str = "## Day ";
const FLOAT_CENTRE: &str = r#"<div class="float_centre""#;
const QUOTE: &str = r#"<div class="quote""#;

/// Build-environment prefixes that leak into pasted logs and backtraces.
static BUILD_PATHS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"/usr/src/debug/xulrunner-qt5-[a-z0-9+\-._]+/", ""),
        (r"/home/abuild/rpmbuild/BUILD/xulrunner-qt5-[a-z0-9+\-._]+/", ""),
        (r"/srv/mer/toings/SailfishOS-[0-9.]+/opt/cross/[a-z0-9-]+/", ""),
        (
            r"/home/flypig/Documents/Development/jolla/gecko-dev-esr91/gecko-dev/",
            "${PROJECT}/",
        ),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let re = Regex::new(pattern).expect("build path patterns are valid");
        (re, replacement)
    })
    .collect()
});

/* ============================== Transforms =============================== */

/// Escape text for output inside an element.
pub fn escape(text: &str) -> String {
    encode_quoted_attribute(text).into_owned()
}

fn substitute_typography(text: &str) -> String {
    text.replace('—', "&mdash;").replace('"', "&quot;")
}

fn is_list(para: &str) -> bool {
    para.starts_with("<ol") || para.starts_with("<ul")
}

/// Markup placed after a paragraph that is not the last one in its block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Separator {
    Blank,
    SingleBreak,
    DoubleBreak,
}

impl Separator {
    fn between(para: &str, next: &str) -> Self {
        if para.starts_with(DAY_HEADING)
            || para.starts_with(FLOAT_CENTRE)
            || para.starts_with(QUOTE)
            || is_list(para)
        {
            Separator::Blank
        } else if is_list(next) {
            Separator::SingleBreak
        } else {
            Separator::DoubleBreak
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Separator::Blank => "\n\n",
            Separator::SingleBreak => "\n<br />\n\n",
            Separator::DoubleBreak => "\n<br /><br />\n\n",
        }
    }
}

/// Lay out a flushed paragraph buffer. The last paragraph gets no separator.
pub fn convert_prose(chunk: &str) -> String {
    let body = chunk.trim_matches('\n');
    let paras: Vec<&str> = body.split("\n\n").collect();

    let mut out = String::with_capacity(body.len() + paras.len() * 16);
    for (i, para) in paras.iter().enumerate() {
        out.push_str(para);
        if let Some(next) = paras.get(i + 1) {
            out.push_str(Separator::between(para, next).as_str());
        }
    }
    out
}

/// Remove build-environment path prefixes from preformatted text.
pub fn strip_build_paths(text: &str) -> String {
    let mut text = text.to_owned();
    for (pattern, replacement) in BUILD_PATHS.iter() {
        text = pattern.replace_all(&text, NoExpand(*replacement)).into_owned();
    }
    text
}

/// Render the content of a <pre> element.
pub fn convert_pre(raw: &str, wrap: Wrap) -> String {
    let text = strip_build_paths(raw);
    let text = wrap_lines(&text, wrap);
    format!("<pre>\n{}\n</pre>\n\n", escape(&text))
}

/// Render the content of a <tt> element.
pub fn convert_tt(raw: &str) -> String {
    format!("<tt>{}</tt>", escape(raw))
}

/* ================================ Parser ================================= */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Preformatted,
    LiteralSpan,
}

/// Event-driven reflow state.
#[derive(Debug, Default)]
pub struct BlogParser {
    wrap: Wrap,
    stack: Vec<String>,
    mode: Mode,
    /// Markup and text since the last context-defining tag.
    chunk: String,
    /// Text of the open <tt> span.
    tt_chunk: String,
    /// Finished output.
    text: String,
}

impl BlogParser {
    pub fn new(wrap: Wrap) -> Self {
        Self {
            wrap,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Names of the currently open elements, outermost first.
    pub fn open_tags(&self) -> &[String] {
        &self.stack
    }

    pub fn feed(&mut self, src: &str) {
        for token in Tokenizer::new(src) {
            self.handle(token.event);
        }
    }

    pub fn handle(&mut self, event: Event<'_>) {
        log::trace!("{:?} in {:?}", event, self.mode);
        match event {
            Event::StartTag(tag) if tag.self_closing => self.chunk.push_str(tag.raw),
            Event::StartTag(tag) => self.start_tag(tag),
            Event::EndTag(tag) => self.end_tag(tag),
            Event::Text(text) => self.data(text),
            Event::Comment(raw) | Event::Declaration(raw) => {
                log::debug!("dropping {raw:?}");
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        self.stack.push(tag.lowercase_name());
        match self.mode {
            Mode::Normal | Mode::LiteralSpan if tag.is("pre") => {
                if self.mode == Mode::LiteralSpan {
                    self.commit_literal();
                }
                self.flush_prose();
                self.mode = Mode::Preformatted;
            }
            Mode::Normal if tag.is("tt") => self.mode = Mode::LiteralSpan,
            _ => self.chunk.push_str(tag.raw),
        }
    }

    fn end_tag(&mut self, tag: Tag<'_>) {
        self.stack.pop();
        match self.mode {
            Mode::Preformatted if tag.is("pre") => {
                self.mode = Mode::Normal;
                self.flush_pre();
            }
            Mode::LiteralSpan if tag.is("tt") => {
                self.mode = Mode::Normal;
                self.commit_literal();
            }
            _ => {
                let close = format!("</{}>", tag.lowercase_name());
                self.chunk.push_str(&close);
            }
        }
    }

    fn data(&mut self, text: &str) {
        match self.mode {
            Mode::Normal => self.chunk.push_str(&substitute_typography(text)),
            // Both buffers are escaped when they are flushed.
            Mode::Preformatted => self.chunk.push_str(&decode_html_entities(text)),
            Mode::LiteralSpan => self.tt_chunk.push_str(&decode_html_entities(text)),
        }
    }

    fn commit_literal(&mut self) {
        let literal = mem::take(&mut self.tt_chunk);
        self.chunk.push_str(&convert_tt(&literal));
    }

    fn flush_prose(&mut self) {
        let chunk = mem::take(&mut self.chunk);
        if chunk.trim().is_empty() {
            return;
        }
        log::debug!("flushing {} bytes of prose", chunk.len());
        self.text.push_str(&convert_prose(&chunk));
        self.text.push_str("\n\n");
    }

    fn flush_pre(&mut self) {
        let chunk = mem::take(&mut self.chunk);
        log::debug!("flushing {} bytes of preformatted text", chunk.len());
        self.text.push_str(&convert_pre(&chunk, self.wrap));
    }

    /// Flush whatever is still buffered and return the output.
    pub fn finish(mut self) -> String {
        match self.mode {
            Mode::LiteralSpan => self.commit_literal(),
            Mode::Preformatted => {
                log::warn!("<pre> block never closed");
                self.flush_pre();
            }
            Mode::Normal => {}
        }
        self.mode = Mode::Normal;
        self.flush_prose();
        self.text
    }
}

/// Reflow a whole fragment.
pub fn reflow(src: &str, wrap: Wrap) -> String {
    let mut parser = BlogParser::new(wrap);
    parser.feed(src);
    parser.finish()
}
