use crate::parsing::ast::{Ast, NodeKind};

/// Validates parser output invariants.
///
/// Asserts that:
/// - The root is a `Document` spanning the whole input
/// - Every span lies within the input and on `char` boundaries
/// - Every child span is contained in its parent span
/// - Siblings are in source order and do not overlap
/// - Text nodes are never empty
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(ast: &Ast, text: &str) {
    let n = text.len();
    let root = ast.node(ast.root());
    assert_eq!(root.kind, NodeKind::Document, "root is not a Document");
    assert!(
        root.span.start == 0 && root.span.end == n,
        "document span {:?} does not cover input of len {n}",
        root.span
    );

    for (_, node) in ast.walk() {
        let sp = node.span;
        assert!(
            sp.start <= sp.end && sp.end <= n,
            "{} span out of bounds: {sp:?} (len: {n})",
            node.kind.name()
        );
        assert!(
            text.is_char_boundary(sp.start) && text.is_char_boundary(sp.end),
            "{} span {sp:?} splits a character",
            node.kind.name()
        );
        if node.kind == NodeKind::Text {
            assert!(!sp.is_empty(), "empty Text node at {sp:?}");
        }

        let mut prev_end = sp.start;
        for &child_id in &node.children {
            let child = ast.node(child_id).span;
            assert!(
                child.start >= sp.start && child.end <= sp.end,
                "child span {child:?} not contained in {} span {sp:?}",
                node.kind.name()
            );
            assert!(
                child.start >= prev_end,
                "sibling span {child:?} overlaps or precedes previous end {prev_end}"
            );
            prev_end = child.end;
        }
    }
}
