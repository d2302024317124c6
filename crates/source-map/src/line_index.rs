//! Line index for offset → line/column conversion.

use crate::ByteOffset;
use text_size::TextSize;

/// A 0-indexed line and column position.
///
/// `col` is measured in UTF-16 code units, the unit Source Map v3 consumers and
/// JavaScript tooling use for columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// Byte offsets of every line start in a text, for O(log n) lookups.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<ByteOffset>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );
        Self { text, line_starts }
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a line/column position.
    ///
    /// Returns `None` if the offset is past the end of the text or does not
    /// fall on a character boundary.
    pub fn line_col(&self, offset: ByteOffset) -> Option<LineCol> {
        let byte = u32::from(offset) as usize;
        if byte > self.text.len() || !self.text.is_char_boundary(byte) {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let line_start = u32::from(self.line_starts[line]) as usize;
        let col = self.text[line_start..byte].encode_utf16().count() as u32;

        Some(LineCol::new(line as u32, col))
    }

    pub fn line_start(&self, line: u32) -> Option<ByteOffset> {
        self.line_starts.get(line as usize).copied()
    }
}
