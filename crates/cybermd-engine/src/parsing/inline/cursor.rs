/// Byte cursor over one paragraph's inline text.
///
/// Positions reported by [`pos`](Self::pos) are absolute document offsets.
/// Only ASCII bytes are ever matched, so stepping a byte at a time never
/// stops inside a multi-byte `char` at a point where a node could start.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    pub src: &'a str,
    /// Document offset of `src[0]`.
    pub base: usize,
    /// Local index into `src`.
    pub at: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str, base: usize) -> Self {
        Self { src, base, at: 0 }
    }

    pub fn pos(&self) -> usize {
        self.base + self.at
    }

    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.src.as_bytes().get(self.at + n).copied()
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        self.src.get(self.at..).unwrap_or("")
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().as_bytes().starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.at += 1;
        Some(b)
    }

    /// Skips `n` bytes; the caller guarantees they exist.
    pub fn bump_n(&mut self, n: usize) {
        self.at += n;
    }
}
