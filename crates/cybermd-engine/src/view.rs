//! Per-byte style map: the view state that [`ViewOp`]s are applied to.

use std::ops::Range;

use crate::{highlight::StyleTag, parsing::Span, reconcile::ViewOp};

/// The style of every byte of the displayed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    styles: Vec<Option<StyleTag>>,
}

impl StyleMap {
    pub fn new(len: usize) -> Self {
        Self {
            styles: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Follows the text length; new bytes are unstyled.
    pub fn resize(&mut self, len: usize) {
        self.styles.resize(len, None);
    }

    /// Mirrors a text edit that replaced `removed` with `inserted` bytes,
    /// so styles after the edit stay on their text until the next pass.
    pub fn splice(&mut self, removed: Range<usize>, inserted: usize) {
        let end = removed.end.min(self.styles.len());
        let start = removed.start.min(end);
        self.styles
            .splice(start..end, std::iter::repeat_n(None, inserted));
    }

    /// Applies ops in order. Spans beyond the map are clamped.
    pub fn apply(&mut self, ops: &[ViewOp]) {
        for op in ops {
            let (span, style) = match *op {
                ViewOp::Clear(span) => (span, None),
                ViewOp::Apply(span, tag) => (span, Some(tag)),
            };
            let end = span.end.min(self.styles.len());
            let start = span.start.min(end);
            self.styles[start..end].fill(style);
        }
    }

    pub fn style_at(&self, offset: usize) -> Option<StyleTag> {
        self.styles.get(offset).copied().flatten()
    }

    /// Maximal runs of equal style within `range`.
    pub fn runs(&self, range: Range<usize>) -> Vec<(Span, Option<StyleTag>)> {
        let end = range.end.min(self.styles.len());
        let start = range.start.min(end);
        let mut out: Vec<(Span, Option<StyleTag>)> = vec![];
        for (i, &style) in self.styles[start..end].iter().enumerate() {
            let at = start + i;
            match out.last_mut() {
                Some((span, current)) if *current == style => span.end = at + 1,
                _ => out.push((Span::new(at, at + 1), style)),
            }
        }
        out
    }
}
