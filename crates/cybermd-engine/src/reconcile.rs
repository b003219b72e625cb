//! Highlight reconciliation.
//!
//! Turns the previous and next highlight ranges into view operations and
//! owns the versioned state the view was last painted from.

use log::debug;

use crate::{
    highlight::{HighlightRange, StyleTag, extent},
    parsing::Span,
};

/// One instruction for the text view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOp {
    /// Remove all styling in the span.
    Clear(Span),
    /// Style the span.
    Apply(Span, StyleTag),
}

/// Computes the operations turning a view painted with `previous` into one
/// painted with `next`.
///
/// Identical inputs need no work. Otherwise the whole previous extent is
/// cleared and every next range is applied in order, so later (narrower)
/// ranges layer over the ones containing them.
pub fn diff(previous: &[HighlightRange], next: &[HighlightRange]) -> Vec<ViewOp> {
    if previous == next {
        return vec![];
    }
    let mut ops = Vec::with_capacity(next.len() + 1);
    if let Some(span) = extent(previous) {
        ops.push(ViewOp::Clear(span));
    }
    ops.extend(next.iter().map(|r| ViewOp::Apply(r.span, r.style)));
    ops
}

/// The ranges currently shown and the document version they came from.
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    version: Option<u64>,
    ranges: Vec<HighlightRange>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> Option<u64> {
        self.version
    }

    pub fn ranges(&self) -> &[HighlightRange] {
        &self.ranges
    }

    /// Replaces the state with `ranges` for `version` and returns the ops
    /// to apply. Returns `None`, leaving the state untouched, when
    /// `version` is older than the one already shown.
    pub fn accept(&mut self, version: u64, ranges: Vec<HighlightRange>) -> Option<Vec<ViewOp>> {
        if let Some(current) = self.version
            && version < current
        {
            debug!("refusing highlights for version {version}, view is at {current}");
            return None;
        }
        let ops = diff(&self.ranges, &ranges);
        debug!(
            "highlight state v{version}: {} ranges, {} view ops",
            ranges.len(),
            ops.len()
        );
        self.version = Some(version);
        self.ranges = ranges;
        Some(ops)
    }
}
