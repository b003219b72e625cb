use crate::parsing::source::Span;

/// A parsed inline node with byte spans into the source.
///
/// All variants store spans rather than text, enabling lossless round-trip.
/// Containers own their children; they are lowered into the arena once the
/// whole block has been scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Plain text that isn't part of any special construct.
    Text(Span),
    /// A code span, backticks included. This is a "raw zone" - no parsing inside.
    Code(Span),
    /// Hard line break: trailing spaces or backslash plus the newline.
    LineBreak(Span),
    Emphasis {
        span: Span,
        children: Vec<InlineNode>,
    },
    Strong {
        span: Span,
        children: Vec<InlineNode>,
    },
    Link {
        /// `[label](target "title")`.
        span: Span,
        /// `[label]`, brackets included.
        label: Span,
        target: Span,
        title: Option<Span>,
        children: Vec<InlineNode>,
    },
    Image {
        span: Span,
        /// `![alt]`, markers included.
        alt: Span,
        target: Span,
        title: Option<Span>,
    },
}

impl InlineNode {
    /// Extracts the full span from any inline node variant.
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(sp) | InlineNode::Code(sp) | InlineNode::LineBreak(sp) => *sp,
            InlineNode::Emphasis { span, .. }
            | InlineNode::Strong { span, .. }
            | InlineNode::Link { span, .. }
            | InlineNode::Image { span, .. } => *span,
        }
    }
}

/// Joins adjacent, touching `Text` nodes.
pub fn merge_text(nodes: Vec<InlineNode>) -> Vec<InlineNode> {
    let mut out: Vec<InlineNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Some(InlineNode::Text(prev)), InlineNode::Text(next)) = (out.last_mut(), &node)
            && prev.end == next.start
        {
            prev.end = next.end;
            continue;
        }
        out.push(node);
    }
    out
}
