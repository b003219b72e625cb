//! Versioned text buffer.
//!
//! The buffer is an `xi_rope::Rope`, so taking a snapshot for a background
//! pass is a cheap clone rather than a copy of the text.

use std::ops::Range;

use xi_rope::Rope;

/// An immutable view of the document at one version.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    version: u64,
    text: Rope,
}

impl DocumentSnapshot {
    pub fn new(version: u64, text: impl Into<Rope>) -> Self {
        Self {
            version,
            text: text.into(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len() == 0
    }

    /// Materializes the text for parsing.
    pub fn to_text(&self) -> String {
        self.text.to_string()
    }
}

/// The editable document: a rope buffer plus a version bumped on every edit.
///
/// Offsets are byte offsets and must fall on `char` boundaries, as with
/// [`String::insert_str`]. Offsets past the end are clamped.
#[derive(Debug, Clone, Default)]
pub struct Document {
    buffer: Rope,
    version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding `text` at version 0.
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Inserts `text` at `at`, returning the new version.
    pub fn insert(&mut self, at: usize, text: &str) -> u64 {
        let at = at.min(self.len());
        self.buffer.edit(at..at, text);
        self.bump()
    }

    /// Deletes `range`, returning the new version.
    pub fn delete(&mut self, range: Range<usize>) -> u64 {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.buffer.edit(start..end, "");
        self.bump()
    }

    /// Replaces the whole text (e.g. after loading a file).
    pub fn replace_all(&mut self, text: &str) -> u64 {
        self.buffer = Rope::from(text);
        self.bump()
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            version: self.version,
            text: self.buffer.clone(),
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Number of lines for the gutter; an empty document has one line, and
    /// a trailing newline starts a new one.
    pub fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    /// Zero-based line containing byte `offset` (clamped).
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.buffer.line_of_offset(offset.min(self.len()))
    }

    /// Byte offset where zero-based `line` starts (clamped to the last line).
    pub fn offset_of_line(&self, line: usize) -> usize {
        let last = self.line_count() - 1;
        self.buffer.offset_of_line(line.min(last))
    }

    fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}
