use super::kinds::{AtxHeading, BlockQuote, CodeFence, FenceOpen, ListMarker, ThematicBreak};

/// What a line could start, decided from the line alone.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context. The builder then decides
/// whether, in context, a classification opens a block or merely continues
/// a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStart {
    Blank,
    ThematicBreak,
    Heading(AtxHeading),
    Fence(FenceOpen),
    /// Bytes of quote prefix to strip.
    Quote(usize),
    ListItem(ListMarker),
    /// Four or more columns of indentation.
    IndentedCode,
    Text,
}

impl LineStart {
    /// True if this line ends an open paragraph instead of continuing it.
    pub fn interrupts_paragraph(&self) -> bool {
        match self {
            LineStart::ThematicBreak
            | LineStart::Heading(_)
            | LineStart::Fence(_)
            | LineStart::Quote(_) => true,
            LineStart::ListItem(m) => !m.is_empty,
            LineStart::Blank | LineStart::IndentedCode | LineStart::Text => false,
        }
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line (newline already stripped).
    ///
    /// Precedence is fixed: thematic break, heading, code fence, block
    /// quote, list item, paragraph text. A line like `* * *` is therefore a
    /// break rather than a list item, and `> - x` is a quote.
    pub fn classify(line: &str) -> LineStart {
        if line.trim().is_empty() {
            return LineStart::Blank;
        }
        if indent_columns(line).0 >= 4 {
            return LineStart::IndentedCode;
        }
        if ThematicBreak::matches(line) {
            return LineStart::ThematicBreak;
        }
        if let Some(h) = AtxHeading::parse(line) {
            return LineStart::Heading(h);
        }
        if let Some(open) = CodeFence::open(line) {
            return LineStart::Fence(open);
        }
        if let Some(n) = BlockQuote::strip_prefix(line) {
            return LineStart::Quote(n);
        }
        if let Some(m) = ListMarker::parse(line) {
            return LineStart::ListItem(m);
        }
        LineStart::Text
    }
}

/// Leading whitespace as `(columns, bytes)`; tabs advance to the next multiple of 4.
pub fn indent_columns(line: &str) -> (usize, usize) {
    let mut cols = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => cols += 1,
            b'\t' => cols += 4 - cols % 4,
            _ => break,
        }
        bytes += 1;
    }
    (cols, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kind(line: &str) -> &'static str {
        match MarkdownLineClassifier::classify(line) {
            LineStart::Blank => "blank",
            LineStart::ThematicBreak => "break",
            LineStart::Heading(_) => "heading",
            LineStart::Fence(_) => "fence",
            LineStart::Quote(_) => "quote",
            LineStart::ListItem(_) => "list",
            LineStart::IndentedCode => "indented",
            LineStart::Text => "text",
        }
    }

    #[rstest]
    #[case("", "blank")]
    #[case("   \t", "blank")]
    #[case("* * *", "break")]
    #[case("- - -", "break")]
    #[case("# Title", "heading")]
    #[case("```", "fence")]
    #[case("> quoted", "quote")]
    #[case("> - item", "quote")]
    #[case("- item", "list")]
    #[case("3. third", "list")]
    #[case("    code", "indented")]
    #[case("\tcode", "indented")]
    #[case("just words", "text")]
    fn precedence(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(kind(line), expected);
    }

    #[test]
    fn empty_list_item_does_not_interrupt_paragraph() {
        assert!(!MarkdownLineClassifier::classify("-").interrupts_paragraph());
        assert!(MarkdownLineClassifier::classify("- x").interrupts_paragraph());
        assert!(!MarkdownLineClassifier::classify("    x").interrupts_paragraph());
    }

    #[test]
    fn tab_indent_counts_to_next_stop() {
        assert_eq!(indent_columns("  \tx"), (4, 3));
        assert_eq!(indent_columns("x"), (0, 0));
    }
}
