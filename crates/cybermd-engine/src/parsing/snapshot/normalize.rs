use std::fmt;

use crate::parsing::{
    ast::{Ast, Node, NodeKind},
    source::{Span, preview},
};

/// Flattened view of a parsed document for tests.
#[derive(Debug)]
pub struct Snap {
    /// Every node in preorder.
    pub nodes: Vec<NodeSnap>,
}

/// Snapshot of a single node.
#[derive(Debug)]
pub struct NodeSnap {
    /// Distance from the document root (root is 0).
    pub depth: u16,
    /// Kind label with its key attributes (e.g. "Heading(2)", "CodeBlock(rust)").
    pub kind: String,
    /// Byte span as (start, end) tuple.
    pub span: (usize, usize),
    /// Named sub-spans (e.g. "marker", "target").
    pub parts: Vec<(String, (usize, usize))>,
    /// Preview of leaf text; empty for containers.
    pub text: String,
}

/// Converts an AST into a stable snapshot.
pub fn normalize(ast: &Ast, text: &str) -> Snap {
    let nodes = ast
        .walk()
        .map(|(depth, node)| NodeSnap {
            depth,
            kind: kind_label(node),
            span: (node.span.start, node.span.end),
            parts: parts(node),
            text: match node.kind {
                NodeKind::Text | NodeKind::Code => preview(text, node.span, 40),
                _ => String::new(),
            },
        })
        .collect();
    Snap { nodes }
}

fn kind_label(node: &Node) -> String {
    match &node.kind {
        NodeKind::Heading { level } => format!("Heading({level})"),
        NodeKind::List { ordered: true } => "List(ordered)".into(),
        NodeKind::List { ordered: false } => "List(bullet)".into(),
        NodeKind::CodeBlock {
            language: Some(lang),
        } => format!("CodeBlock({lang})"),
        kind => kind.name().into(),
    }
}

fn parts(node: &Node) -> Vec<(String, (usize, usize))> {
    let pair = |name: &str, sp: Span| (name.to_string(), (sp.start, sp.end));
    match &node.kind {
        NodeKind::ListItem { marker } => vec![pair("marker", *marker)],
        NodeKind::Link {
            label,
            target,
            title,
        } => {
            let mut out = vec![pair("label", *label), pair("target", *target)];
            out.extend(title.map(|t| pair("title", t)));
            out
        }
        NodeKind::Image { alt, target, title } => {
            let mut out = vec![pair("alt", *alt), pair("target", *target)];
            out.extend(title.map(|t| pair("title", t)));
            out
        }
        _ => vec![],
    }
}

/// Indented one-node-per-line rendering, used in inline snapshots.
impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let indent = "  ".repeat(usize::from(node.depth));
            write!(f, "{indent}{} {}..{}", node.kind, node.span.0, node.span.1)?;
            for (name, (start, end)) in &node.parts {
                write!(f, " {name}={start}..{end}")?;
            }
            if !node.text.is_empty() {
                write!(f, " {:?}", node.text)?;
            }
        }
        Ok(())
    }
}
