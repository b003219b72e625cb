use super::span::Span;

/// A single physical line of the source with its byte span.
#[derive(Debug, Clone, Copy)]
pub struct LineRef<'a> {
    /// Byte span of this line in the source (includes newline if present).
    pub span: Span,
    /// The line text, newline included.
    pub text: &'a str,
}

/// Returns an iterator over lines with their byte spans.
///
/// Newlines are kept on each line so that spans tile the source exactly.
pub fn lines_with_spans(text: &str) -> impl Iterator<Item = LineRef<'_>> + '_ {
    let mut offset = 0usize;
    text.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span { start, end: offset },
            text: line,
        }
    })
}
