//! # Markdown Parsing
//!
//! Turns document text into an arena-backed [`Ast`] whose every node carries
//! a byte span into the input.
//!
//! ## Phases
//!
//! 1. **Blocks** (`blocks`): lines are classified one by one and grouped into
//!    block nodes; containers strip their prefixes and recurse.
//! 2. **Inlines** (`inline`): each paragraph and heading's content is scanned
//!    for code spans, links, emphasis and hard breaks.
//!
//! Parsing never fails. Malformed input is recovered (an unclosed fence runs
//! to the end of its container, a dangling `*` is text) and the recovery is
//! reported through [`parse_with_diagnostics`].

pub mod ast;
pub mod blocks;
pub mod diagnostics;
pub mod inline;
pub mod snapshot;
pub mod source;

#[cfg(test)]
mod tests;

pub use ast::{Ast, Node, NodeId, NodeKind};
pub use diagnostics::{Anomaly, AnomalyKind, ParseOutcome};
pub use source::Span;

use ast::AstBuilder;
use blocks::BlockBuilder;

/// Parses `text` into a syntax tree.
///
/// The result is a pure function of `text`.
pub fn parse(text: &str) -> Ast {
    parse_with_diagnostics(text).into_ast()
}

/// Parses `text`, also reporting every construct that had to be recovered.
pub fn parse_with_diagnostics(text: &str) -> ParseOutcome {
    let mut ast = AstBuilder::new();
    let mut anomalies = Vec::new();
    let blocks = BlockBuilder::new(text, &mut ast, &mut anomalies).parse_document();
    ParseOutcome::new(ast.finish(text.len(), blocks), anomalies)
}
