use super::leading_spaces;

/// Blockquote block type with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered in
/// classifier code.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: u8 = b'>';

    /// Strips one level of blockquote prefix, returning the byte offset where
    /// the quoted content begins.
    ///
    /// Accepts up to three spaces of indentation, the `>` marker and one
    /// optional following space or tab. Nested quotes (`> >`, `>>`) are
    /// handled by stripping again on the remainder.
    pub fn strip_prefix(s: &str) -> Option<usize> {
        let b = s.as_bytes();
        let i = leading_spaces(s);
        if i > 3 || b.get(i) != Some(&Self::PREFIX) {
            return None;
        }
        let mut end = i + 1;
        if matches!(b.get(end), Some(b' ' | b'\t')) {
            end += 1;
        }
        Some(end)
    }

    /// Counts nested quote levels on a line (`> > x` is depth 2).
    pub fn depth(s: &str) -> u8 {
        let mut depth = 0u8;
        let mut rest = s;
        while let Some(n) = Self::strip_prefix(rest) {
            depth = depth.saturating_add(1);
            rest = &rest[n..];
        }
        depth
    }
}
