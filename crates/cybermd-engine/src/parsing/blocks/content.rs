//! Content projection for lines nested inside prefix containers.
//!
//! A line inside a blockquote or list item carries a container prefix
//! (`> `, indentation) before its meaningful content. Block parsing strips
//! prefixes level by level; inline parsing needs the content of a
//! multi-line paragraph without those prefixes but at its original offsets.

use super::classify::indent_columns;
use super::kinds::Paragraph;
use crate::parsing::source::Span;

/// A single line's content within its current container.
///
/// # Invariants
///
/// - `raw_line.start <= start`
/// - `start + text.len() <= raw_line.end`
/// - the bytes in `[raw_line.start, start)` are the container prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLine<'a> {
    /// Full physical line span in the source, newline included.
    pub raw_line: Span,
    /// Absolute offset where `text` begins.
    pub start: usize,
    /// Remainder after stripping container prefixes, newline excluded.
    pub text: &'a str,
}

impl<'a> ContentLine<'a> {
    pub fn new(raw_line: Span, raw_text: &'a str) -> Self {
        let text = raw_text
            .strip_suffix('\n')
            .map(|t| t.strip_suffix('\r').unwrap_or(t))
            .unwrap_or(raw_text);
        Self {
            raw_line,
            start: raw_line.start,
            text,
        }
    }

    /// Drops the first `n` bytes of content (a container prefix).
    pub fn strip(self, n: usize) -> Self {
        let n = n.min(self.text.len());
        Self {
            raw_line: self.raw_line,
            start: self.start + n,
            text: &self.text[n..],
        }
    }

    /// Drops leading whitespace up to `cols` columns.
    pub fn strip_indent(self, cols: usize) -> Self {
        let mut seen = 0;
        let mut bytes = 0;
        for b in self.text.bytes() {
            if seen >= cols {
                break;
            }
            match b {
                b' ' => seen += 1,
                b'\t' => seen += 4 - seen % 4,
                _ => break,
            }
            bytes += 1;
        }
        self.strip(bytes)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn indent(&self) -> usize {
        indent_columns(self.text).0
    }

    /// Offset of the first non-whitespace byte (or the end of an empty line).
    pub fn content_start(&self) -> usize {
        self.start + (self.text.len() - self.text.trim_start().len())
    }

    /// Offset just past the last non-whitespace byte.
    pub fn trimmed_end(&self) -> usize {
        self.start + self.text.trim_end().len()
    }
}

/// Returns `source[span]` with the container prefixes of every line but
/// the first overwritten by spaces, so inline scanning sees only content
/// while byte offsets stay aligned with the source.
pub fn masked_content(source: &str, lines: &[ContentLine<'_>], span: Span) -> String {
    let slice = crate::parsing::source::slice(source, span);
    let mut bytes = slice.as_bytes().to_vec();
    for line in lines.iter().skip(1) {
        let from = line.raw_line.start.max(span.start);
        let to = line.start.min(span.end);
        for b in bytes
            .iter_mut()
            .take(to.saturating_sub(span.start))
            .skip(from.saturating_sub(span.start))
        {
            if b.is_ascii() {
                *b = Paragraph::MASK;
            }
        }
    }
    String::from_utf8(bytes).unwrap_or_else(|_| slice.to_string())
}
