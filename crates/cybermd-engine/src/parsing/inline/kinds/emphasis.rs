/// A run of `*` or `_` characters that may open and/or close emphasis.
///
/// Offsets are absolute. As matches consume characters, openers shrink
/// from the right and closers from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimRun {
    pub ch: u8,
    pub start: usize,
    pub end: usize,
    pub can_open: bool,
    pub can_close: bool,
}

impl DelimRun {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    /// Deepest emphasis/strong nesting that is still paired; openers that
    /// would wrap deeper content stay literal.
    pub const MAX_NESTING: u16 = 32;

    /// Bucket for the openers-bottom table: closers in the same bucket
    /// agree on which openers they can pair with.
    pub fn bottom_key(&self) -> usize {
        let ch = usize::from(self.ch == Self::UNDERSCORE);
        ch * 6 + usize::from(self.can_open) * 3 + self.len() % 3
    }

    /// Scans the run at local index `i` of `s`, classifying it by the
    /// flanking rules.
    pub fn scan(s: &str, i: usize, base: usize) -> Self {
        let ch = s.as_bytes()[i];
        let len = s.as_bytes()[i..].iter().take_while(|&&b| b == ch).count();
        let before = s[..i].chars().next_back();
        let after = s[i + len..].chars().next();

        let ws_before = before.is_none_or(char::is_whitespace);
        let ws_after = after.is_none_or(char::is_whitespace);
        let punct_before = before.is_some_and(is_punctuation);
        let punct_after = after.is_some_and(is_punctuation);

        let left = !ws_after && (!punct_after || ws_before || punct_before);
        let right = !ws_before && (!punct_before || ws_after || punct_after);

        let (can_open, can_close) = if ch == Self::UNDERSCORE {
            (left && (!right || punct_before), right && (!left || punct_after))
        } else {
            (left, right)
        };

        Self {
            ch,
            start: base + i,
            end: base + i + len,
            can_open,
            can_close,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if `self` (an opener) may pair with `closer`.
    ///
    /// When either run can both open and close, the sum of the lengths may
    /// not be a multiple of 3 unless both are.
    pub fn pairs_with(&self, closer: &DelimRun) -> bool {
        if self.ch != closer.ch || !self.can_open || self.is_empty() {
            return false;
        }
        if self.can_close || closer.can_open {
            let (a, b) = (self.len(), closer.len());
            if (a + b) % 3 == 0 && !(a % 3 == 0 && b % 3 == 0) {
                return false;
            }
        }
        true
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace() && !c.is_ascii())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_run_at_word_start_opens() {
        let run = DelimRun::scan("**bold**", 0, 0);
        assert_eq!((run.start, run.end), (0, 2));
        assert!(run.can_open);
        assert!(!run.can_close);
    }

    #[test]
    fn star_run_at_word_end_closes() {
        let run = DelimRun::scan("**bold** text", 6, 0);
        assert!(run.can_close);
        assert!(!run.can_open);
    }

    #[test]
    fn spaced_star_is_literal() {
        let run = DelimRun::scan("a * b", 2, 0);
        assert!(!run.can_open && !run.can_close);
    }

    #[test]
    fn intraword_underscore_is_inert() {
        let run = DelimRun::scan("snake_case", 5, 0);
        assert!(!run.can_open && !run.can_close);
        let star = DelimRun::scan("snake*case", 5, 0);
        assert!(star.can_open && star.can_close);
    }

    #[test]
    fn rule_of_three_blocks_mixed_runs() {
        let opener = DelimRun {
            ch: b'*',
            start: 0,
            end: 1,
            can_open: true,
            can_close: true,
        };
        let closer = DelimRun {
            ch: b'*',
            start: 5,
            end: 7,
            can_open: false,
            can_close: true,
        };
        assert!(!opener.pairs_with(&closer));
    }
}
