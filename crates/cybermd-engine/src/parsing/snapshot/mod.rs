//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts an [`Ast`](crate::parsing::Ast) to a stable,
//!   serializable `Snap` that also renders as an indented tree for `insta`
//!   inline snapshots
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds,
//!   child spans contained in parents, siblings ordered)
//!
//! ## Testing Strategy
//!
//! Parsing behavior is defined by snapshot tests rather than a separate
//! formal grammar. Snapshots assert node kinds, spans, and key sub-spans
//! (list markers, link targets).

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
