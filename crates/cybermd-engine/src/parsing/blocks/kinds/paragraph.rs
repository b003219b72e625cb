/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the default leaf block when no
/// other block opener matches. Inline parsing is applied to paragraph
/// content, with container prefixes on continuation lines masked out.
pub struct Paragraph;

impl Paragraph {
    /// Byte written over container prefixes before inline scanning.
    pub const MASK: u8 = b' ';
}
