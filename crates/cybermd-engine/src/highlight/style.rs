use crate::parsing::Span;

/// Closed set of visual styles a highlight range can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleTag {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    Bold,
    Italic,
    InlineCode,
    CodeBlock,
    Link,
    Quote,
    ListMarker,
    Plain,
}

impl StyleTag {
    pub const ALL: [StyleTag; 14] = [
        StyleTag::Heading1,
        StyleTag::Heading2,
        StyleTag::Heading3,
        StyleTag::Heading4,
        StyleTag::Heading5,
        StyleTag::Heading6,
        StyleTag::Bold,
        StyleTag::Italic,
        StyleTag::InlineCode,
        StyleTag::CodeBlock,
        StyleTag::Link,
        StyleTag::Quote,
        StyleTag::ListMarker,
        StyleTag::Plain,
    ];

    /// Heading style for an ATX level; out-of-range levels clamp to 1..=6.
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => StyleTag::Heading1,
            2 => StyleTag::Heading2,
            3 => StyleTag::Heading3,
            4 => StyleTag::Heading4,
            5 => StyleTag::Heading5,
            _ => StyleTag::Heading6,
        }
    }

    pub fn is_heading(self) -> bool {
        matches!(
            self,
            StyleTag::Heading1
                | StyleTag::Heading2
                | StyleTag::Heading3
                | StyleTag::Heading4
                | StyleTag::Heading5
                | StyleTag::Heading6
        )
    }
}

/// A styled byte range produced by one highlight pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightRange {
    pub span: Span,
    pub style: StyleTag,
    /// AST depth of the emitting node; deeper is more specific.
    pub depth: u16,
}

impl HighlightRange {
    pub fn new(span: Span, style: StyleTag, depth: u16) -> Self {
        Self { span, style, depth }
    }
}
