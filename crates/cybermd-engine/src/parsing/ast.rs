//! Arena-backed Markdown syntax tree.
//!
//! Nodes live in a flat `Vec` and refer to their children by [`NodeId`].
//! A child belongs to exactly one parent and there are no back references,
//! so an [`Ast`] is immutable once built and cheap to share.

use super::source::Span;

/// Index of a node inside its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Block and inline node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The root; its children are the top-level blocks.
    Document,
    Heading {
        /// 1..=6
        level: u8,
    },
    Paragraph,
    /// A run of list items of the same kind; the items are its children.
    List {
        ordered: bool,
    },
    ListItem {
        /// The bullet or `1.` marker.
        marker: Span,
    },
    CodeBlock {
        /// First word of a fence's info string.
        language: Option<String>,
    },
    BlockQuote,
    ThematicBreak,
    Text,
    Emphasis,
    Strong,
    /// Inline code span, backticks included.
    Code,
    Link {
        /// `[label]`, brackets included.
        label: Span,
        target: Span,
        title: Option<Span>,
    },
    Image {
        /// `![alt]`, markers included.
        alt: Span,
        target: Span,
        title: Option<Span>,
    },
    LineBreak,
}

impl NodeKind {
    /// Short, stable label used by snapshots and logs.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Heading { .. } => "Heading",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::List { .. } => "List",
            NodeKind::ListItem { .. } => "ListItem",
            NodeKind::CodeBlock { .. } => "CodeBlock",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::ThematicBreak => "ThematicBreak",
            NodeKind::Text => "Text",
            NodeKind::Emphasis => "Emphasis",
            NodeKind::Strong => "Strong",
            NodeKind::Code => "Code",
            NodeKind::Link { .. } => "Link",
            NodeKind::Image { .. } => "Image",
            NodeKind::LineBreak => "LineBreak",
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Heading { .. }
                | NodeKind::Paragraph
                | NodeKind::List { .. }
                | NodeKind::ListItem { .. }
                | NodeKind::CodeBlock { .. }
                | NodeKind::BlockQuote
                | NodeKind::ThematicBreak
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<NodeId>,
}

/// An immutable parse of one document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[id.index()]
            .children
            .iter()
            .map(|c| &self.nodes[c.index()])
    }

    /// Top-level block nodes.
    pub fn blocks(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children(self.root)
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.node(self.root).children.is_empty()
    }

    /// Depth-first pre-order walk yielding `(depth, node)`; the root has depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            ast: self,
            stack: vec![(0, self.root)],
        }
    }
}

/// Iterator returned by [`Ast::walk`].
pub struct Walk<'a> {
    ast: &'a Ast,
    stack: Vec<(u16, NodeId)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (u16, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let node = self.ast.node(id);
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, *c)));
        Some((depth, node))
    }
}

/// Builds an [`Ast`] bottom-up: children are pushed before their parent.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, span: Span, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            children,
        });
        id
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub fn finish(mut self, text_len: usize, blocks: Vec<NodeId>) -> Ast {
        let root = self.push(NodeKind::Document, Span::new(0, text_len), blocks);
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_preorder_with_depth() {
        let mut b = AstBuilder::new();
        let text = b.push(NodeKind::Text, Span::new(2, 7), vec![]);
        let heading = b.push(NodeKind::Heading { level: 1 }, Span::new(0, 7), vec![text]);
        let ast = b.finish(7, vec![heading]);

        let seen: Vec<_> = ast.walk().map(|(d, n)| (d, n.kind.name())).collect();
        assert_eq!(
            seen,
            vec![(0, "Document"), (1, "Heading"), (2, "Text")]
        );
    }

    #[test]
    fn empty_document_has_only_root() {
        let ast = AstBuilder::new().finish(0, vec![]);
        assert!(ast.is_empty());
        assert_eq!(ast.len(), 1);
        assert_eq!(ast.node(ast.root()).span, Span::new(0, 0));
    }
}
