//! # Inline Parsing
//!
//! Cursor-based inline parsing with a delimiter stack for emphasis and
//! links.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing and operates over the full
//! content span of inline-eligible blocks (paragraphs and headings).
//!
//! A single left-to-right scan produces a list of pieces: finished nodes
//! (text, code spans, line breaks, links) interleaved with `*`/`_` runs and
//! `[`/`![` openers. A `]` followed by `(target)` closes the nearest opener.
//! Emphasis is resolved last, so it never straddles a link boundary.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum
//! - **`kinds`**: Inline-specific types with owned delimiters (CodeSpan, DelimRun, Link)
//! - **`cursor`**: `Cursor` for byte-by-byte parsing with position tracking
//! - **`parser`**: `parse_inline()` main entry point
//!
//! ## Raw Zone Precedence
//!
//! Code spans take precedence: `` `*not emphasis*` `` parses as a single Code
//! node.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{parse_inline, parse_inline_with};
pub use types::InlineNode;
