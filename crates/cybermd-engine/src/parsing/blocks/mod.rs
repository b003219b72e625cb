//! # Block Parsing
//!
//! Two-phase block parsing over container-relative lines.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a
//!    `LineStart` from local facts alone (indentation, markers, fences)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` groups classified
//!    lines into blocks. Block quotes and list items strip their prefix from
//!    each owned line and parse the rest recursively
//!
//! ## Modules
//!
//! - **`kinds`**: Block-specific types with owned delimiters (BlockQuote, CodeFence, ListMarker, ...)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineStart` for each line
//! - **`content`**: `ContentLine` views with container prefixes stripped
//! - **`builder`**: `BlockBuilder`, the recursive block parser
//!
//! ## Key Invariants
//!
//! - Nesting depth is unbounded (lists in blockquotes in lists, etc.)
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - All block nodes store byte spans into the source

pub mod builder;
pub mod classify;
pub mod content;
pub mod kinds;

pub use builder::BlockBuilder;
pub use classify::{LineStart, MarkdownLineClassifier};
pub use content::ContentLine;
