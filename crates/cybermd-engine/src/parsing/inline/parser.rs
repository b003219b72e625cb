use crate::parsing::{
    diagnostics::{Anomaly, AnomalyKind},
    source::Span,
};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, DelimRun, Link, TickRuns},
    types::{InlineNode, merge_text},
};

/// Parses inline content into a sequence of [`InlineNode`]s.
///
/// # Arguments
/// - `base`: Byte offset in the document where `s` begins (for absolute span positions)
/// - `s`: The string content to parse (a paragraph's or heading's content)
///
/// # Raw Zone Precedence
/// Code spans are checked first and suppress all other parsing inside them.
/// `*emphasis*` inside backticks is part of the code span.
///
/// # Returns
/// A vector of inline nodes covering the entire input. Text between special
/// constructs is emitted as `InlineNode::Text`.
pub fn parse_inline(base: usize, s: &str) -> Vec<InlineNode> {
    let mut anomalies = Vec::new();
    parse_inline_with(base, s, &mut anomalies)
}

/// Like [`parse_inline`], recording recovered anomalies into `anomalies`.
pub fn parse_inline_with(base: usize, s: &str, anomalies: &mut Vec<Anomaly>) -> Vec<InlineNode> {
    let mut parser = InlineParser {
        cur: Cursor::new(s, base),
        pieces: Vec::new(),
        brackets: Vec::new(),
        inactive_below: 0,
        ticks: None,
        text_start: base,
        anomalies,
    };
    parser.run();
    let InlineParser {
        pieces, anomalies, ..
    } = parser;
    process_emphasis(pieces, anomalies).0
}

/// An opening `[` or `![` waiting for its `]`.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    start: usize,
    image: bool,
}

impl Bracket {
    fn span(&self) -> Span {
        let len = if self.image { Link::IMAGE.len() } else { 1 };
        Span::new(self.start, self.start + len)
    }
}

/// Intermediate scan result: finished nodes interleaved with the
/// delimiters and brackets that may still pair up.
#[derive(Debug)]
enum Piece {
    /// A finished node and its nesting depth (leaves are 1).
    Node(InlineNode, u16),
    Delim(DelimRun),
    Bracket(Bracket),
}

impl Piece {
    fn depth(&self) -> u16 {
        match self {
            Piece::Node(_, depth) => *depth,
            Piece::Delim(_) | Piece::Bracket(_) => 1,
        }
    }
}

struct InlineParser<'a, 'b> {
    cur: Cursor<'a>,
    pieces: Vec<Piece>,
    /// Open brackets as indices into `pieces`, innermost last.
    brackets: Vec<usize>,
    /// Non-image brackets below this stack height sit before a finished
    /// link and can no longer open one.
    inactive_below: usize,
    /// Built on the first backtick.
    ticks: Option<TickRuns>,
    text_start: usize,
    anomalies: &'b mut Vec<Anomaly>,
}

impl InlineParser<'_, '_> {
    fn run(&mut self) {
        while let Some(b) = self.cur.peek() {
            match b {
                b'\\' => self.backslash(),
                CodeSpan::TICK => self.code_span(),
                DelimRun::STAR | DelimRun::UNDERSCORE => self.delim_run(),
                b'!' if self.cur.starts_with(Link::IMAGE) => self.open_bracket(true),
                Link::OPEN => self.open_bracket(false),
                Link::CLOSE => self.close_bracket(),
                b'\n' => self.newline(),
                _ => {
                    self.cur.bump();
                }
            }
        }
        let end = self.cur.pos();
        self.flush_text(end);
    }

    fn flush_text(&mut self, end: usize) {
        if end > self.text_start {
            self.pieces.push(Piece::Node(
                InlineNode::Text(Span::new(self.text_start, end)),
                1,
            ));
        }
        self.text_start = end;
    }

    /// Pushes a finished node; the cursor must already be past it.
    fn emit(&mut self, node: InlineNode, depth: u16) {
        self.pieces.push(Piece::Node(node, depth));
        self.text_start = self.cur.pos();
    }

    fn backslash(&mut self) {
        let start = self.cur.pos();
        let break_len = match (self.cur.peek_at(1), self.cur.peek_at(2)) {
            (Some(b'\n'), _) => 2,
            (Some(b'\r'), Some(b'\n')) => 3,
            (Some(c), _) if c.is_ascii_punctuation() => {
                self.cur.bump_n(2);
                return;
            }
            _ => {
                self.cur.bump();
                return;
            }
        };
        self.flush_text(start);
        self.cur.bump_n(break_len);
        self.emit(InlineNode::LineBreak(Span::new(start, self.cur.pos())), 1);
    }

    fn code_span(&mut self) {
        let s = self.cur.src;
        let bytes = s.as_bytes();
        let run = CodeSpan::run_len(bytes, self.cur.at);
        let start = self.cur.pos();
        let closer = self
            .ticks
            .get_or_insert_with(|| CodeSpan::runs(bytes))
            .closer_after(self.cur.at + run, run);
        match closer {
            Some(end) => {
                self.flush_text(start);
                self.cur.bump_n(end - self.cur.at);
                self.emit(InlineNode::Code(Span::new(start, self.cur.pos())), 1);
            }
            None => {
                self.anomalies.push(Anomaly {
                    kind: AnomalyKind::UnclosedCodeSpan,
                    span: Span::new(start, start + run),
                });
                self.cur.bump_n(run);
            }
        }
    }

    fn delim_run(&mut self) {
        let run = DelimRun::scan(self.cur.src, self.cur.at, self.cur.base);
        if !run.can_open && !run.can_close {
            self.cur.bump_n(run.len());
            return;
        }
        self.flush_text(run.start);
        self.cur.bump_n(run.len());
        self.pieces.push(Piece::Delim(run));
        self.text_start = self.cur.pos();
    }

    fn open_bracket(&mut self, image: bool) {
        let start = self.cur.pos();
        self.flush_text(start);
        let bracket = Bracket { start, image };
        self.cur.bump_n(bracket.span().len());
        self.brackets.push(self.pieces.len());
        self.pieces.push(Piece::Bracket(bracket));
        self.text_start = self.cur.pos();
    }

    fn close_bracket(&mut self) {
        let close = self.cur.pos();
        let Some(oi) = self.brackets.pop() else {
            self.cur.bump();
            return;
        };
        let active_from = self.inactive_below;
        self.inactive_below = self.inactive_below.min(self.brackets.len());
        let opener = match &self.pieces[oi] {
            Piece::Bracket(b) => *b,
            _ => {
                self.cur.bump();
                return;
            }
        };

        let tail = if opener.image || self.brackets.len() >= active_from {
            Link::parse_tail(self.cur.rest().get(1..).unwrap_or(""), close + 1)
        } else {
            None
        };
        let Some(tail) = tail else {
            // The opener turns literal; `]` stays in the running text.
            self.pieces[oi] = Piece::Node(InlineNode::Text(opener.span()), 1);
            self.cur.bump();
            return;
        };

        self.flush_text(close);
        let inner: Vec<Piece> = self.pieces.drain(oi + 1..).collect();
        self.pieces.truncate(oi);

        let label = Span::new(opener.start, close + 1);
        let span = Span::new(opener.start, tail.end);
        let (node, depth) = if opener.image {
            let image = InlineNode::Image {
                span,
                alt: label,
                target: tail.target,
                title: tail.title,
            };
            (image, 1)
        } else {
            let (children, depth) = process_emphasis(inner, self.anomalies);
            self.inactive_below = self.brackets.len();
            let link = InlineNode::Link {
                span,
                label,
                target: tail.target,
                title: tail.title,
                children,
            };
            (link, depth + 1)
        };
        self.cur.bump_n(tail.end - close);
        self.emit(node, depth);
    }

    /// Two or more spaces before a newline make a hard break.
    fn newline(&mut self) {
        let bytes = self.cur.src.as_bytes();
        let local = self.cur.at;
        let eol = if local > 0 && bytes[local - 1] == b'\r' {
            local - 1
        } else {
            local
        };
        let floor = self.text_start - self.cur.base;
        let spaces = bytes
            .get(floor..eol)
            .map_or(0, |run| run.iter().rev().take_while(|&&b| b == b' ').count());

        if spaces < 2 {
            self.cur.bump();
            return;
        }
        let start = self.cur.base + eol - spaces;
        self.flush_text(start);
        self.cur.bump();
        self.emit(InlineNode::LineBreak(Span::new(start, self.cur.pos())), 1);
    }
}

/// Per closer bucket (see [`DelimRun::bottom_key`]), the opener-stack
/// height below which a search already failed.
#[derive(Debug, Default)]
struct OpenersBottom([usize; 12]);

impl OpenersBottom {
    fn get(&self, closer: &DelimRun) -> usize {
        self.0[closer.bottom_key()]
    }

    fn set(&mut self, closer: &DelimRun, height: usize) {
        self.0[closer.bottom_key()] = height;
    }

    /// Called whenever the opener stack shrinks to `height`.
    fn clamp(&mut self, height: usize) {
        for bottom in &mut self.0 {
            *bottom = (*bottom).min(height);
        }
    }
}

/// Pairs delimiter runs into `Emphasis` / `Strong` nodes, innermost first.
///
/// Each closer is matched against the nearest compatible opener to its
/// left. Pieces are consumed left to right onto an output stack; openers
/// are tracked as indices into it, and a failed search records its height
/// so later closers of the same bucket do not walk the same openers again.
/// Anything left over becomes text. Returns the nodes and their deepest
/// nesting.
fn process_emphasis(pieces: Vec<Piece>, anomalies: &mut Vec<Anomaly>) -> (Vec<InlineNode>, u16) {
    let mut out: Vec<Piece> = Vec::with_capacity(pieces.len());
    let mut openers: Vec<usize> = Vec::new();
    let mut bottom = OpenersBottom::default();

    for piece in pieces {
        let mut closer = match piece {
            Piece::Delim(run) => run,
            other => {
                out.push(other);
                continue;
            }
        };

        if closer.can_close {
            while !closer.is_empty() {
                let floor = bottom.get(&closer).min(openers.len());
                let found = openers[floor..]
                    .iter()
                    .enumerate()
                    .rev()
                    .find_map(|(p, &k)| match &out[k] {
                        Piece::Delim(o) if o.pairs_with(&closer) => Some((floor + p, k, *o)),
                        _ => None,
                    });
                let Some((pos, k, opener)) = found else {
                    bottom.set(&closer, openers.len());
                    break;
                };

                // Openers between the pair can no longer match anything.
                openers.truncate(pos + 1);
                bottom.clamp(openers.len());

                let inner: Vec<Piece> = out.drain(k + 1..).collect();
                let depth = inner.iter().map(Piece::depth).max().unwrap_or(0) + 1;
                if depth > DelimRun::MAX_NESTING {
                    anomalies.push(Anomaly {
                        kind: AnomalyKind::NestingTooDeep,
                        span: Span::new(opener.start, closer.end),
                    });
                    // Any remaining opener would wrap the same content.
                    openers.clear();
                    bottom.clamp(0);
                    out.extend(inner);
                    continue;
                }

                let n = if opener.len() >= 2 && closer.len() >= 2 {
                    2
                } else {
                    1
                };
                let span = Span::new(opener.end - n, closer.start + n);
                let children =
                    merge_text(inner.into_iter().map(|p| settle(p, anomalies)).collect());
                let node = if n == 2 {
                    InlineNode::Strong { span, children }
                } else {
                    InlineNode::Emphasis { span, children }
                };

                let opener_left = DelimRun {
                    end: opener.end - n,
                    ..opener
                };
                if opener_left.is_empty() {
                    out.truncate(k);
                    openers.pop();
                    bottom.clamp(openers.len());
                } else {
                    out[k] = Piece::Delim(opener_left);
                }
                out.push(Piece::Node(node, depth));
                closer.start += n;
            }
        }

        if !closer.is_empty() {
            if closer.can_open {
                openers.push(out.len());
            }
            out.push(Piece::Delim(closer));
        }
    }

    let depth = out.iter().map(Piece::depth).max().unwrap_or(0);
    let nodes = out.into_iter().map(|p| settle(p, anomalies)).collect();
    (merge_text(nodes), depth)
}

/// Turns a leftover piece into a node; unpaired syntax becomes text.
fn settle(piece: Piece, anomalies: &mut Vec<Anomaly>) -> InlineNode {
    match piece {
        Piece::Node(node, _) => node,
        Piece::Delim(d) => {
            let span = Span::new(d.start, d.end);
            anomalies.push(Anomaly {
                kind: AnomalyKind::UnmatchedDelimiter,
                span,
            });
            InlineNode::Text(span)
        }
        Piece::Bracket(b) => {
            anomalies.push(Anomaly {
                kind: AnomalyKind::UnclosedBracket,
                span: b.span(),
            });
            InlineNode::Text(b.span())
        }
    }
}
