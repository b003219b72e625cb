use super::leading_spaces;

/// A recognized ATX heading line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtxHeading {
    pub level: u8,
    /// Start of the heading text (local byte offset).
    pub content_start: usize,
    /// End of the heading text, closing `#` run and whitespace removed.
    pub content_end: usize,
}

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    pub fn parse(line: &str) -> Option<Self> {
        let b = line.as_bytes();
        let indent = leading_spaces(line);
        if indent > 3 {
            return None;
        }
        let hashes = b[indent..].iter().take_while(|&&c| c == Self::MARKER).count();
        if hashes == 0 || hashes > Self::MAX_LEVEL {
            return None;
        }
        let after = indent + hashes;
        if !matches!(b.get(after), None | Some(b' ' | b'\t')) {
            return None;
        }

        let body = &line[after..];
        let content_start = after + (body.len() - body.trim_start().len());
        let mut content_end = line.trim_end().len().max(content_start);

        // Optional closing sequence: a `#` run preceded by whitespace.
        let tail = &line[content_start..content_end];
        let without_hashes = tail.trim_end_matches('#');
        if without_hashes.len() < tail.len()
            && (without_hashes.is_empty() || without_hashes.ends_with([' ', '\t']))
        {
            content_end = content_start + without_hashes.trim_end().len();
        }

        Some(Self {
            level: hashes as u8,
            content_start,
            content_end,
        })
    }
}
