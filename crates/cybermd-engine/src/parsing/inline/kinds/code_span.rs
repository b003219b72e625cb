use std::collections::HashMap;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones" - no other inline parsing occurs inside them.
/// The delimiter lives here.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Length of the backtick run starting at `i`.
    pub fn run_len(s: &[u8], i: usize) -> usize {
        s[i..].iter().take_while(|&&b| b == Self::TICK).count()
    }

    /// Indexes every backtick run in `s` by length, so closers are found
    /// without rescanning the rest of the input per opener.
    pub fn runs(s: &[u8]) -> TickRuns {
        let mut by_len: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut i = 0;
        while i < s.len() {
            if s[i] == Self::TICK {
                let run = Self::run_len(s, i);
                by_len.entry(run).or_default().push(i);
                i += run;
            } else {
                i += 1;
            }
        }
        TickRuns { by_len }
    }
}

/// Backtick run starts grouped by run length, in ascending order.
#[derive(Debug, Default)]
pub struct TickRuns {
    by_len: HashMap<usize, Vec<usize>>,
}

impl TickRuns {
    /// End (exclusive) of the first run of exactly `len` backticks that
    /// starts at or after `from`.
    pub fn closer_after(&self, from: usize, len: usize) -> Option<usize> {
        let starts = self.by_len.get(&len)?;
        let idx = starts.partition_point(|&p| p < from);
        starts.get(idx).map(|&p| p + len)
    }
}
