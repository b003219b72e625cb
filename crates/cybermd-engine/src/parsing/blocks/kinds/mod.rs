pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_item;
pub mod paragraph;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceOpen};
pub use heading::AtxHeading;
pub use list_item::{ListKind, ListMarker};
pub use paragraph::Paragraph;
pub use thematic_break::ThematicBreak;

/// Deepest block quote / list item nesting parsed as structure. Container
/// markers past it are read as paragraph text.
pub const MAX_NESTING: usize = 32;

/// Number of leading ASCII spaces.
pub(crate) fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}
