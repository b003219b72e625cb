use crate::parsing::source::Span;

/// Inline link and image syntax.
pub struct Link;

/// The `(target "title")` part following a closing bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTail {
    pub target: Span,
    pub title: Option<Span>,
    /// Absolute offset just past the closing `)`.
    pub end: usize,
}

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE: &'static [u8; 2] = b"![";
    /// Deepest unescaped `(` nesting accepted in a bare destination.
    pub const MAX_PAREN_DEPTH: usize = 32;

    /// Parses a link tail from `s`, which begins right after `]` at
    /// absolute offset `base`. Returns `None` unless the whole
    /// `(destination [title])` form is present.
    pub fn parse_tail(s: &str, base: usize) -> Option<LinkTail> {
        let b = s.as_bytes();
        if b.first() != Some(&b'(') {
            return None;
        }
        let mut i = skip_ws(b, 1);

        let target;
        if b.get(i) == Some(&b'<') {
            let start = i + 1;
            let close = b[start..]
                .iter()
                .position(|&c| c == b'>' || c == b'\n' || c == b'<')?;
            if b[start + close] != b'>' {
                return None;
            }
            target = Span::new(base + start, base + start + close);
            i = start + close + 1;
        } else {
            let start = i;
            let mut depth = 0usize;
            while let Some(&c) = b.get(i) {
                match c {
                    b'\\' if i + 1 < b.len() => i += 2,
                    b'(' if depth == Self::MAX_PAREN_DEPTH => return None,
                    b'(' => {
                        depth += 1;
                        i += 1;
                    }
                    b')' if depth == 0 => break,
                    b')' => {
                        depth -= 1;
                        i += 1;
                    }
                    c if c.is_ascii_whitespace() || c.is_ascii_control() => break,
                    _ => i += 1,
                }
            }
            if depth != 0 {
                return None;
            }
            target = Span::new(base + start, base + i);
        }

        let after_target = i;
        i = skip_ws(b, i);
        let mut title = None;
        if i > after_target
            && let Some(&open) = b.get(i)
            && matches!(open, b'"' | b'\'' | b'(')
        {
            let close = if open == b'(' { b')' } else { open };
            let start = i + 1;
            let mut j = start;
            while j < b.len() && b[j] != close {
                if open == b'(' && b[j] == b'(' {
                    return None;
                }
                j += if b[j] == b'\\' { 2 } else { 1 };
            }
            if j >= b.len() {
                return None;
            }
            title = Some(Span::new(base + start, base + j));
            i = skip_ws(b, j + 1);
        }

        if b.get(i) != Some(&b')') {
            return None;
        }
        Some(LinkTail {
            target,
            title,
            end: base + i + 1,
        })
    }
}

fn skip_ws(b: &[u8], mut i: usize) -> usize {
    while matches!(b.get(i), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_destination() {
        let tail = Link::parse_tail("(https://example.com) rest", 10).unwrap();
        assert_eq!(tail.target, Span::new(11, 30));
        assert_eq!(tail.title, None);
        assert_eq!(tail.end, 31);
    }

    #[test]
    fn destination_with_title() {
        let tail = Link::parse_tail(r#"(url "Title")"#, 0).unwrap();
        assert_eq!(tail.target, Span::new(1, 4));
        assert_eq!(tail.title, Some(Span::new(6, 11)));
        assert_eq!(tail.end, 13);
    }

    #[test]
    fn angle_destination_may_contain_spaces() {
        let tail = Link::parse_tail("(<a b>)", 0).unwrap();
        assert_eq!(tail.target, Span::new(2, 5));
        assert_eq!(tail.end, 7);
    }

    #[test]
    fn balanced_parentheses_in_destination() {
        let tail = Link::parse_tail("(a(b)c)", 0).unwrap();
        assert_eq!(tail.target, Span::new(1, 6));
    }

    #[test]
    fn empty_destination_is_allowed() {
        let tail = Link::parse_tail("()", 0).unwrap();
        assert!(tail.target.is_empty());
    }

    #[test]
    fn rejects_incomplete_tails() {
        assert_eq!(Link::parse_tail("", 0), None);
        assert_eq!(Link::parse_tail(" (url)", 0), None);
        assert_eq!(Link::parse_tail("(url", 0), None);
        assert_eq!(Link::parse_tail("(a b)", 0), None);
        assert_eq!(Link::parse_tail(r#"(url "open)"#, 0), None);
        assert_eq!(Link::parse_tail("(url (a (b))", 0), None);
    }

    #[test]
    fn destination_paren_nesting_is_bounded() {
        let shallow = format!("({}x{})", "(".repeat(3), ")".repeat(3));
        assert!(Link::parse_tail(&shallow, 0).is_some());
        let deep = format!("({}x{})", "(".repeat(40), ")".repeat(40));
        assert_eq!(Link::parse_tail(&deep, 0), None);
    }
}
