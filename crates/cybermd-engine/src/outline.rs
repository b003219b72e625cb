//! Heading outline of a parsed document.

use crate::parsing::{Ast, Node, NodeKind, Span, source::slice};

/// One heading in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u8,
    /// Heading text with inline markup removed.
    pub title: String,
    pub span: Span,
}

/// Collects every heading, including those nested in quotes and lists.
pub fn outline(ast: &Ast, text: &str) -> Vec<OutlineEntry> {
    ast.walk()
        .filter_map(|(_, node)| match node.kind {
            NodeKind::Heading { level } => {
                let mut title = String::new();
                plain_text(ast, node, text, &mut title);
                Some(OutlineEntry {
                    level,
                    title: title.trim().to_string(),
                    span: node.span,
                })
            }
            _ => None,
        })
        .collect()
}

fn plain_text(ast: &Ast, node: &Node, text: &str, out: &mut String) {
    for &child in &node.children {
        let child = ast.node(child);
        match child.kind {
            NodeKind::Text => out.push_str(slice(text, child.span)),
            NodeKind::Code => out.push_str(slice(text, child.span).trim_matches('`')),
            NodeKind::LineBreak => out.push(' '),
            NodeKind::Image { alt, .. } => {
                let alt = slice(text, alt);
                out.push_str(alt.trim_start_matches("![").trim_end_matches(']'));
            }
            _ => plain_text(ast, child, text, out),
        }
    }
}
