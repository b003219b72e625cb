//! # Highlighting
//!
//! Walks an [`Ast`] into styled byte ranges. Pure and total: the same tree
//! always yields the same ranges, and every node kind is handled.

pub mod style;
pub mod theme;

use std::cmp::Reverse;

use crate::parsing::{Ast, NodeKind, Span};

pub use style::{HighlightRange, StyleTag};
pub use theme::{Rgb, StyleSpec, Theme, UnknownTheme};

/// Produces the highlight ranges for `ast`.
///
/// Each node contributes at most one range, at its AST depth. The result
/// is ordered by start offset, longest first among equal starts, so a
/// containing range always precedes the ranges nested in it.
pub fn highlight(ast: &Ast) -> Vec<HighlightRange> {
    let mut ranges: Vec<HighlightRange> = ast
        .walk()
        .filter_map(|(depth, node)| {
            let (span, style) = match &node.kind {
                NodeKind::Heading { level } => (node.span, StyleTag::heading(*level)),
                NodeKind::Strong => (node.span, StyleTag::Bold),
                NodeKind::Emphasis => (node.span, StyleTag::Italic),
                NodeKind::Code => (node.span, StyleTag::InlineCode),
                NodeKind::CodeBlock { .. } => (node.span, StyleTag::CodeBlock),
                NodeKind::BlockQuote => (node.span, StyleTag::Quote),
                NodeKind::ListItem { marker } => (*marker, StyleTag::ListMarker),
                NodeKind::Link { label, .. } => (*label, StyleTag::Link),
                NodeKind::Image { alt, .. } => (*alt, StyleTag::Link),
                NodeKind::Document
                | NodeKind::Paragraph
                | NodeKind::List { .. }
                | NodeKind::ThematicBreak
                | NodeKind::Text
                | NodeKind::LineBreak => return None,
            };
            Some(HighlightRange::new(span, style, depth))
        })
        .collect();
    ranges.sort_by_key(|r| (r.span.start, Reverse(r.span.len())));
    ranges
}

/// Byte extent covered by `ranges`, or `None` when empty.
pub fn extent(ranges: &[HighlightRange]) -> Option<Span> {
    ranges.iter().map(|r| r.span).reduce(Span::cover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    fn ranges(md: &str) -> Vec<(usize, usize, StyleTag, u16)> {
        highlight(&parse(md))
            .into_iter()
            .map(|r| (r.span.start, r.span.end, r.style, r.depth))
            .collect()
    }

    #[test]
    fn heading_covers_whole_line() {
        assert_eq!(ranges("# Hello"), vec![(0, 7, StyleTag::Heading1, 1)]);
    }

    #[test]
    fn bold_text() {
        assert_eq!(ranges("**bold** text"), vec![(0, 8, StyleTag::Bold, 2)]);
    }

    #[test]
    fn inline_code() {
        assert_eq!(ranges("`code`"), vec![(0, 6, StyleTag::InlineCode, 2)]);
    }

    #[test]
    fn empty_document_has_no_ranges() {
        assert!(ranges("").is_empty());
    }

    #[test]
    fn plain_paragraph_has_no_ranges() {
        assert!(ranges("just words\n\n---\n").is_empty());
    }

    #[test]
    fn list_marker_and_link_label_only() {
        assert_eq!(
            ranges("- [a](b)"),
            vec![
                (0, 1, StyleTag::ListMarker, 2),
                (2, 5, StyleTag::Link, 4),
            ]
        );
    }

    #[test]
    fn image_uses_link_style() {
        assert_eq!(ranges("![x](y.png)"), vec![(0, 4, StyleTag::Link, 2)]);
    }

    #[test]
    fn containing_range_precedes_nested_ones() {
        assert_eq!(
            ranges("> # *a*"),
            vec![
                (0, 7, StyleTag::Quote, 1),
                (2, 7, StyleTag::Heading1, 2),
                (4, 7, StyleTag::Italic, 3),
            ]
        );
    }

    #[test]
    fn code_block_range() {
        assert_eq!(
            ranges("```\nx\n```"),
            vec![(0, 9, StyleTag::CodeBlock, 1)]
        );
    }

    #[test]
    fn same_depth_ranges_never_overlap() {
        let md = "# a *b*\n\n- *c* **d** `e`\n- [f](g)\n\n> h *i*\n";
        let ranges = highlight(&parse(md));
        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                if a.depth == b.depth {
                    assert!(
                        a.span.end <= b.span.start || b.span.end <= a.span.start,
                        "{a:?} overlaps {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn output_is_sorted_by_start() {
        let md = "- **a** *b*\n- `c`\n";
        let ranges = highlight(&parse(md));
        assert!(ranges.windows(2).all(|w| w[0].span.start <= w[1].span.start));
    }

    #[test]
    fn extent_spans_all_ranges() {
        let ranges = highlight(&parse("# a\n\n`b`"));
        assert_eq!(extent(&ranges), Some(Span::new(0, 8)));
        assert_eq!(extent(&[]), None);
    }
}
