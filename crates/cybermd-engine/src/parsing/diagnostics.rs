//! Recovered parse anomalies.
//!
//! The parser never fails. When it has to fall back (an unclosed code
//! fence, a dangling `*`), it records an [`Anomaly`] and carries on. These
//! are diagnostics only: no caller treats them as errors.

use super::{ast::Ast, source::Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Fenced code block that reached the end of its container.
    UnterminatedCodeFence,
    /// Backtick run with no closing run of equal length.
    UnclosedCodeSpan,
    /// `*` or `_` run left without a partner; kept as text.
    UnmatchedDelimiter,
    /// `[` or `![` that never became a link or image.
    UnclosedBracket,
    /// Containers or emphasis nested past the supported depth; the excess
    /// markers are kept as text.
    NestingTooDeep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub span: Span,
}

/// Result of a parse, distinguishing clean input from input that needed recovery.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Clean(Ast),
    Recovered { ast: Ast, anomalies: Vec<Anomaly> },
}

impl ParseOutcome {
    pub(crate) fn new(ast: Ast, anomalies: Vec<Anomaly>) -> Self {
        if anomalies.is_empty() {
            ParseOutcome::Clean(ast)
        } else {
            ParseOutcome::Recovered { ast, anomalies }
        }
    }

    pub fn ast(&self) -> &Ast {
        match self {
            ParseOutcome::Clean(ast) | ParseOutcome::Recovered { ast, .. } => ast,
        }
    }

    pub fn into_ast(self) -> Ast {
        match self {
            ParseOutcome::Clean(ast) | ParseOutcome::Recovered { ast, .. } => ast,
        }
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        match self {
            ParseOutcome::Clean(_) => &[],
            ParseOutcome::Recovered { anomalies, .. } => anomalies,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, ParseOutcome::Clean(_))
    }
}
