//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK = b'\`'` - raw zone that suppresses other parsing
//! - **`DelimRun`**: `*` / `_` runs with their flanking classification
//! - **`Link`**: `[`, `]`, `![` and the `(target "title")` tail
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in parser code.
//! The parser calls these constants; it never hardcodes `[` or `` ` ``.

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::{CodeSpan, TickRuns};
pub use emphasis::DelimRun;
pub use link::{Link, LinkTail};
