use super::leading_spaces;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn byte(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// An opening fence line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen {
    pub kind: FenceKind,
    /// Number of fence characters; a closer needs at least this many.
    pub len: usize,
    /// Leading spaces before the fence.
    pub indent: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LEN: usize = 3;

    /// Recognizes an opening fence: up to three spaces then three or more
    /// backticks or tildes. A backtick fence's info string may not contain
    /// backticks.
    pub fn open(line: &str) -> Option<FenceOpen> {
        let indent = leading_spaces(line);
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let kind = match rest.as_bytes().first()? {
            b'`' => FenceKind::Backticks,
            b'~' => FenceKind::Tildes,
            _ => return None,
        };
        let len = rest.bytes().take_while(|&b| b == kind.byte()).count();
        if len < Self::MIN_LEN {
            return None;
        }
        if kind == FenceKind::Backticks && rest[len..].contains('`') {
            return None;
        }
        Some(FenceOpen { kind, len, indent })
    }

    /// True if `line` closes a fence opened by `open`.
    pub fn closes(open: &FenceOpen, line: &str) -> bool {
        let indent = leading_spaces(line);
        if indent > 3 {
            return false;
        }
        let rest = &line[indent..];
        let len = rest.bytes().take_while(|&b| b == open.kind.byte()).count();
        len >= open.len && rest[len..].trim().is_empty()
    }

    /// First word of the info string, if any.
    pub fn language(open: &FenceOpen, line: &str) -> Option<String> {
        let info = line.get(open.indent + open.len..)?.trim();
        info.split_whitespace().next().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        let open = CodeFence::open("```rust").unwrap();
        assert_eq!(open.kind, FenceKind::Backticks);
        assert_eq!(open.len, 3);
        assert_eq!(CodeFence::language(&open, "```rust"), Some("rust".into()));
    }

    #[test]
    fn detect_tilde_fence() {
        let open = CodeFence::open("~~~~").unwrap();
        assert_eq!(open.kind, FenceKind::Tildes);
        assert_eq!(open.len, 4);
        assert_eq!(CodeFence::language(&open, "~~~~"), None);
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("``"), None);
        assert_eq!(CodeFence::open("    ```"), None);
    }

    #[test]
    fn backtick_info_may_not_contain_backticks() {
        assert_eq!(CodeFence::open("``` a`b"), None);
        assert!(CodeFence::open("~~~ a`b").is_some());
    }

    #[test]
    fn closes_matching_fence() {
        let open = CodeFence::open("````").unwrap();
        assert!(CodeFence::closes(&open, "`````"));
        assert!(CodeFence::closes(&open, "````  "));
        assert!(!CodeFence::closes(&open, "```"));
        assert!(!CodeFence::closes(&open, "```` trailing"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let backticks = CodeFence::open("```").unwrap();
        let tildes = CodeFence::open("~~~").unwrap();
        assert!(!CodeFence::closes(&backticks, "~~~"));
        assert!(!CodeFence::closes(&tildes, "```"));
    }
}
