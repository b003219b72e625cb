use crate::parsing::{
    ast::{AstBuilder, NodeId, NodeKind},
    diagnostics::{Anomaly, AnomalyKind},
    inline::{InlineNode, parse_inline_with},
    source::{Span, lines_with_spans, slice},
};

use super::{
    classify::{LineStart, MarkdownLineClassifier},
    content::{ContentLine, masked_content},
    kinds::{AtxHeading, BlockQuote, CodeFence, FenceOpen, ListMarker, MAX_NESTING},
};

/// Recursive block parser.
///
/// Leaf blocks are emitted directly; containers (block quotes, list items)
/// strip their prefix from every line they own and parse the remainder as
/// a nested document. Inline content is parsed as soon as its paragraph or
/// heading closes, so the arena fills bottom-up.
pub struct BlockBuilder<'s, 'b> {
    source: &'s str,
    ast: &'b mut AstBuilder,
    anomalies: &'b mut Vec<Anomaly>,
    /// Containers enclosing the lines currently being parsed.
    depth: usize,
}

impl<'s, 'b> BlockBuilder<'s, 'b> {
    pub fn new(source: &'s str, ast: &'b mut AstBuilder, anomalies: &'b mut Vec<Anomaly>) -> Self {
        Self {
            source,
            ast,
            anomalies,
            depth: 0,
        }
    }

    /// Parses the whole source, returning the top-level blocks in order.
    pub fn parse_document(&mut self) -> Vec<NodeId> {
        let lines: Vec<ContentLine<'s>> = lines_with_spans(self.source)
            .map(|l| ContentLine::new(l.span, l.text))
            .collect();
        self.parse_blocks(&lines)
    }

    /// Parses one container's worth of lines into sibling blocks.
    pub fn parse_blocks(&mut self, lines: &[ContentLine<'s>]) -> Vec<NodeId> {
        let mut out = vec![];
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            let (id, next) = match MarkdownLineClassifier::classify(line.text) {
                LineStart::Blank => {
                    i += 1;
                    continue;
                }
                LineStart::Quote(_) | LineStart::ListItem(_) if self.depth >= MAX_NESTING => {
                    self.anomalies.push(Anomaly {
                        kind: AnomalyKind::NestingTooDeep,
                        span: Span::new(line.content_start(), line.trimmed_end()),
                    });
                    self.paragraph(lines, i)
                }
                LineStart::ThematicBreak => {
                    let span = Span::new(line.content_start(), line.trimmed_end());
                    (self.ast.push(NodeKind::ThematicBreak, span, vec![]), i + 1)
                }
                LineStart::Heading(h) => (self.heading(line, h), i + 1),
                LineStart::Fence(open) => self.fenced_code(lines, i, open),
                LineStart::Quote(_) => self.block_quote(lines, i),
                LineStart::ListItem(m) => self.list(lines, i, m),
                LineStart::IndentedCode => self.indented_code(lines, i),
                LineStart::Text => self.paragraph(lines, i),
            };
            out.push(id);
            i = next;
        }
        out
    }

    fn heading(&mut self, line: ContentLine<'s>, h: AtxHeading) -> NodeId {
        let base = line.start + h.content_start;
        let content = line.text.get(h.content_start..h.content_end).unwrap_or("");
        let inlines = parse_inline_with(base, content, self.anomalies);
        let children = self.lower_all(inlines);
        let span = Span::new(line.content_start(), line.trimmed_end());
        self.ast
            .push(NodeKind::Heading { level: h.level }, span, children)
    }

    fn paragraph(&mut self, lines: &[ContentLine<'s>], i: usize) -> (NodeId, usize) {
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if line.is_blank() || self.interrupts_paragraph(line.text) {
                break;
            }
            j += 1;
        }
        let owned = &lines[i..j];
        let span = Span::new(lines[i].content_start(), lines[j - 1].trimmed_end());
        let content = masked_content(self.source, owned, span);
        let inlines = parse_inline_with(span.start, &content, self.anomalies);
        let children = self.lower_all(inlines);
        (self.ast.push(NodeKind::Paragraph, span, children), j)
    }

    fn interrupts_paragraph(&self, text: &str) -> bool {
        match MarkdownLineClassifier::classify(text) {
            LineStart::Quote(_) | LineStart::ListItem(_) if self.depth >= MAX_NESTING => false,
            start => start.interrupts_paragraph(),
        }
    }

    /// Parses a container's stripped lines one level deeper.
    fn nested(&mut self, lines: &[ContentLine<'s>]) -> Vec<NodeId> {
        self.depth += 1;
        let children = self.parse_blocks(lines);
        self.depth -= 1;
        children
    }

    fn fenced_code(
        &mut self,
        lines: &[ContentLine<'s>],
        i: usize,
        open: FenceOpen,
    ) -> (NodeId, usize) {
        let first = lines[i];
        let language = CodeFence::language(&open, first.text);
        let start = first.content_start();
        let mut end = first.trimmed_end();
        let mut j = i + 1;
        let mut closed = false;
        while j < lines.len() {
            let line = lines[j];
            j += 1;
            if CodeFence::closes(&open, line.text) {
                end = line.trimmed_end();
                closed = true;
                break;
            }
            end = end.max(line.start + line.text.len());
        }

        let span = Span::new(start, end);
        if !closed {
            self.anomalies.push(Anomaly {
                kind: AnomalyKind::UnterminatedCodeFence,
                span,
            });
        }
        (
            self.ast
                .push(NodeKind::CodeBlock { language }, span, vec![]),
            j,
        )
    }

    /// Consecutive lines indented four or more columns; interior blank
    /// lines belong to the block, trailing ones do not.
    fn indented_code(&mut self, lines: &[ContentLine<'s>], i: usize) -> (NodeId, usize) {
        let mut last = i;
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if line.is_blank() {
                j += 1;
                continue;
            }
            if line.indent() < 4 {
                break;
            }
            last = j;
            j += 1;
        }
        let span = Span::new(lines[i].content_start(), lines[last].trimmed_end());
        (
            self.ast
                .push(NodeKind::CodeBlock { language: None }, span, vec![]),
            last + 1,
        )
    }

    fn block_quote(&mut self, lines: &[ContentLine<'s>], i: usize) -> (NodeId, usize) {
        let mut inner: Vec<ContentLine<'s>> = vec![];
        let mut lazy = LazyState::default();
        let mut j = i;
        while j < lines.len() {
            let line = lines[j];
            if let Some(n) = BlockQuote::strip_prefix(line.text) {
                let stripped = line.strip(n);
                lazy.observe(stripped.text);
                inner.push(stripped);
            } else if lazy.accepts(line.text) {
                inner.push(line);
            } else {
                break;
            }
            j += 1;
        }

        let span = Span::new(lines[i].content_start(), self.physical_end(lines[j - 1]));
        let children = self.nested(&inner);
        (self.ast.push(NodeKind::BlockQuote, span, children), j)
    }

    fn list(&mut self, lines: &[ContentLine<'s>], i: usize, first: ListMarker) -> (NodeId, usize) {
        let kind = first.kind;
        let mut items = vec![];
        let mut marker = first;
        let mut j = i;
        loop {
            let (item, next) = self.list_item(lines, j, marker);
            items.push(item);
            j = next;

            let mut k = j;
            while k < lines.len() && lines[k].is_blank() {
                k += 1;
            }
            match lines.get(k).map(|l| MarkdownLineClassifier::classify(l.text)) {
                Some(LineStart::ListItem(m)) if m.kind == kind => {
                    marker = m;
                    j = k;
                }
                _ => break,
            }
        }

        let start = self.ast.span(items[0]).start;
        let end = items
            .last()
            .map_or(start, |&last| self.ast.span(last).end);
        let ordered = kind.is_ordered();
        (
            self.ast
                .push(NodeKind::List { ordered }, Span::new(start, end), items),
            j,
        )
    }

    fn list_item(
        &mut self,
        lines: &[ContentLine<'s>],
        i: usize,
        m: ListMarker,
    ) -> (NodeId, usize) {
        let first = lines[i];
        let head = first.strip(m.content_offset);
        let mut inner = vec![head];
        let mut lazy = LazyState::default();
        lazy.observe(head.text);
        let mut last = i;
        let mut j = i + 1;

        while j < lines.len() {
            let line = lines[j];
            if line.is_blank() {
                // An item that starts empty may not start with a blank line.
                if m.is_empty && last == i {
                    break;
                }
                let run_end = lines[j..]
                    .iter()
                    .position(|l| !l.is_blank())
                    .map_or(lines.len(), |p| j + p);
                let resumes = lines
                    .get(run_end)
                    .is_some_and(|l| l.indent() >= m.content_indent);
                if !resumes {
                    break;
                }
                for blank in &lines[j..run_end] {
                    let stripped = blank.strip_indent(m.content_indent);
                    lazy.observe(stripped.text);
                    inner.push(stripped);
                }
                j = run_end;
                continue;
            }
            if line.indent() >= m.content_indent {
                let stripped = line.strip_indent(m.content_indent);
                lazy.observe(stripped.text);
                inner.push(stripped);
            } else if lazy.accepts(line.text) {
                inner.push(line);
            } else {
                break;
            }
            last = j;
            j += 1;
        }

        let marker = Span::new(first.start + m.marker_start, first.start + m.marker_end);
        let end = self.physical_end(lines[last]).max(marker.end);
        let children = self.nested(&inner[..=last - i]);
        (
            self.ast.push(
                NodeKind::ListItem { marker },
                Span::new(marker.start, end),
                children,
            ),
            last + 1,
        )
    }

    /// Trimmed end of the physical line, independent of container prefixes.
    fn physical_end(&self, line: ContentLine<'_>) -> usize {
        line.raw_line.start + slice(self.source, line.raw_line).trim_end().len()
    }

    fn lower_all(&mut self, nodes: Vec<InlineNode>) -> Vec<NodeId> {
        nodes.into_iter().map(|n| self.lower(n)).collect()
    }

    fn lower(&mut self, node: InlineNode) -> NodeId {
        match node {
            InlineNode::Text(span) => self.ast.push(NodeKind::Text, span, vec![]),
            InlineNode::Code(span) => self.ast.push(NodeKind::Code, span, vec![]),
            InlineNode::LineBreak(span) => self.ast.push(NodeKind::LineBreak, span, vec![]),
            InlineNode::Emphasis { span, children } => {
                let children = self.lower_all(children);
                self.ast.push(NodeKind::Emphasis, span, children)
            }
            InlineNode::Strong { span, children } => {
                let children = self.lower_all(children);
                self.ast.push(NodeKind::Strong, span, children)
            }
            InlineNode::Link {
                span,
                label,
                target,
                title,
                children,
            } => {
                let children = self.lower_all(children);
                self.ast.push(
                    NodeKind::Link {
                        label,
                        target,
                        title,
                    },
                    span,
                    children,
                )
            }
            InlineNode::Image {
                span,
                alt,
                target,
                title,
            } => self
                .ast
                .push(NodeKind::Image { alt, target, title }, span, vec![]),
        }
    }
}

/// Tracks whether a container's last line left a paragraph open, which
/// lets an unprefixed line continue it lazily.
#[derive(Debug, Default)]
struct LazyState {
    paragraph: bool,
    fence: Option<FenceOpen>,
}

impl LazyState {
    /// Records a line that belongs to the container (prefix stripped).
    fn observe(&mut self, text: &str) {
        if let Some(open) = self.fence {
            if CodeFence::closes(&open, text) {
                self.fence = None;
            }
            self.paragraph = false;
            return;
        }
        if let LineStart::Fence(open) = MarkdownLineClassifier::classify(text) {
            self.fence = Some(open);
            self.paragraph = false;
            return;
        }
        self.paragraph = continues_paragraph(self.paragraph, text);
    }

    /// True if an unprefixed `text` may continue the open paragraph.
    fn accepts(&self, text: &str) -> bool {
        self.paragraph && is_lazy_continuation(text)
    }
}

/// Whether a paragraph is still open after a container line whose
/// prefix-stripped content is `text`.
///
/// Nested container prefixes are peeled off in turn; past [`MAX_NESTING`]
/// the rest of the line is paragraph text.
fn continues_paragraph(was_open: bool, text: &str) -> bool {
    let mut was_open = was_open;
    let mut text = text;
    for _ in 0..MAX_NESTING {
        match MarkdownLineClassifier::classify(text) {
            LineStart::Blank => return false,
            LineStart::Text => return true,
            LineStart::IndentedCode => return was_open,
            LineStart::Quote(n) => text = text.get(n..).unwrap_or(""),
            LineStart::ListItem(m) if !m.is_empty => {
                text = text.get(m.content_offset..).unwrap_or("");
            }
            _ => return false,
        }
        was_open = false;
    }
    true
}

/// A line without the container's prefix that may still extend an open
/// paragraph inside it.
fn is_lazy_continuation(text: &str) -> bool {
    matches!(
        MarkdownLineClassifier::classify(text),
        LineStart::Text | LineStart::IndentedCode
    )
}
