//! Byte ranges within a module.

use std::ops::Range;
use text_size::{TextRange, TextSize};

/// A byte offset into a module's text.
pub type ByteOffset = TextSize;

/// A half-open byte range `[start, end)` in either the original or the
/// rewritten text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: ByteOffset,
    pub end: ByteOffset,
}

impl Span {
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Builds a span from a `usize` range, as produced by regex matches and
    /// `str::find`.
    ///
    /// Module text is limited to `u32::MAX` bytes; larger offsets saturate.
    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        Self::new(to_offset(range.start), to_offset(range.end))
    }

    #[inline]
    pub fn len(&self) -> TextSize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, offset: ByteOffset) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns true if the two spans share at least one byte.
    #[inline]
    pub fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The span as a `usize` range, for slicing the text it was taken from.
    #[inline]
    pub fn range(self) -> Range<usize> {
        u32::from(self.start) as usize..u32::from(self.end) as usize
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self::new(range.start(), range.end())
    }
}

impl From<Span> for TextRange {
    fn from(span: Span) -> Self {
        TextRange::new(span.start, span.end)
    }
}

pub(crate) fn to_offset(value: usize) -> ByteOffset {
    TextSize::from(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_range_roundtrip() {
        let span = Span::from_range(4..9);
        assert_eq!(span.start, TextSize::from(4));
        assert_eq!(span.len(), TextSize::from(5));
        assert_eq!(span.range(), 4..9);
        assert_eq!(&"const Box = 1"[span.range()], "t Box");
    }

    #[test]
    fn test_contains_is_half_open() {
        let span = Span::new(5u32, 15u32);
        assert!(!span.contains(TextSize::from(4)));
        assert!(span.contains(TextSize::from(5)));
        assert!(!span.contains(TextSize::from(15)));
    }

    #[test]
    fn test_overlaps() {
        let a = Span::new(0u32, 10u32);
        assert!(a.overlaps(Span::new(9u32, 12u32)));
        assert!(!a.overlaps(Span::new(10u32, 12u32)));
        assert!(Span::new(3u32, 4u32).overlaps(a));
        assert!(!Span::new(10u32, 10u32).overlaps(a));
    }
}
