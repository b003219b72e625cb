use super::leading_spaces;

/// Distinguishes which items may share one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `-`, `*` or `+`.
    Bullet(u8),
    /// Digits followed by `.` or `)`.
    Ordered(u8),
}

impl ListKind {
    pub fn is_ordered(self) -> bool {
        matches!(self, ListKind::Ordered(_))
    }
}

/// A list item marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub kind: ListKind,
    /// Local byte range of the marker itself (`-`, `12.`).
    pub marker_start: usize,
    pub marker_end: usize,
    /// Local byte offset where the item's first-line content begins.
    pub content_offset: usize,
    /// Column continuation lines must reach to belong to the item.
    pub content_indent: usize,
    /// Nothing follows the marker on its line.
    pub is_empty: bool,
}

impl ListMarker {
    pub const BULLETS: &'static [u8] = b"-*+";
    pub const MAX_DIGITS: usize = 9;

    pub fn parse(line: &str) -> Option<Self> {
        let b = line.as_bytes();
        let indent = leading_spaces(line);
        if indent > 3 {
            return None;
        }

        let (kind, marker_end) = match b.get(indent)? {
            c if Self::BULLETS.contains(c) => (ListKind::Bullet(*c), indent + 1),
            c if c.is_ascii_digit() => {
                let digits = b[indent..].iter().take_while(|c| c.is_ascii_digit()).count();
                if digits > Self::MAX_DIGITS {
                    return None;
                }
                let delim = *b.get(indent + digits)?;
                if delim != b'.' && delim != b')' {
                    return None;
                }
                (ListKind::Ordered(delim), indent + digits + 1)
            }
            _ => return None,
        };

        let marker_width = marker_end - indent;
        if marker_end == line.trim_end().len() {
            return Some(Self {
                kind,
                marker_start: indent,
                marker_end,
                content_offset: line.len(),
                content_indent: indent + marker_width + 1,
                is_empty: true,
            });
        }
        if !matches!(b.get(marker_end), Some(b' ' | b'\t')) {
            return None;
        }

        let spaces = b[marker_end..]
            .iter()
            .take_while(|&&c| c == b' ' || c == b'\t')
            .count();
        // Five or more spaces after the marker: the content is indented code
        // and the item's content column sits one space after the marker.
        let gap = if spaces >= 5 { 1 } else { spaces };
        Some(Self {
            kind,
            marker_start: indent,
            marker_end,
            content_offset: marker_end + gap,
            content_indent: indent + marker_width + gap,
            is_empty: false,
        })
    }
}
