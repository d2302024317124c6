//! Mapping collection while rewritten output is written.

use crate::span::to_offset;
use crate::{ByteOffset, Span};
use text_size::TextSize;

/// How the bytes of a generated span relate to their original span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    /// Copied unchanged: generated byte `k` of the span is original byte `k`.
    Verbatim,
    /// Emitted by a rewrite template. Every generated byte is attributed to the
    /// start of the original span.
    Synthetic,
}

/// A single mapping from a generated span to an original span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated: Span,
    pub original: Span,
    pub kind: MappingKind,
}

impl Mapping {
    fn original_offset(&self, generated: ByteOffset) -> ByteOffset {
        match self.kind {
            MappingKind::Verbatim => self.original.start + (generated - self.generated.start),
            MappingKind::Synthetic => self.original.start,
        }
    }
}

/// Mappings from rewritten text back to the original module, sorted by
/// generated position.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    mappings: Vec<Mapping>,
}

impl SourceMap {
    #[inline]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter()
    }

    /// Finds the original position of a generated position.
    ///
    /// Returns `None` for generated text with no origin, such as injected
    /// import lines.
    pub fn original_position(&self, generated: ByteOffset) -> Option<ByteOffset> {
        let idx = match self
            .mappings
            .binary_search_by(|m| m.generated.start.cmp(&generated))
        {
            Ok(idx) => idx,
            Err(idx) => idx.checked_sub(1)?,
        };

        self.mappings
            .get(idx)
            .filter(|m| m.generated.contains(generated))
            .map(|m| m.original_offset(generated))
    }

}

/// Collects mappings while rewritten output is appended front to back.
#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    mappings: Vec<Mapping>,
    generated_offset: ByteOffset,
}

impl SourceMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `text` copied unchanged from `original_start`.
    pub fn add_source(&mut self, original_start: ByteOffset, text: &str) {
        if text.is_empty() {
            return;
        }
        let len = to_offset(text.len());
        self.push(
            Span::new(original_start, original_start + len),
            len,
            MappingKind::Verbatim,
        );
    }

    /// Records template text standing in for `original`.
    pub fn add_synthetic(&mut self, original: Span, text: &str) {
        if text.is_empty() {
            return;
        }
        self.push(original, to_offset(text.len()), MappingKind::Synthetic);
    }

    /// Records text with no original counterpart.
    pub fn add_generated(&mut self, text: &str) {
        self.generated_offset += to_offset(text.len());
    }

    fn push(&mut self, original: Span, len: TextSize, kind: MappingKind) {
        let start = self.generated_offset;
        self.generated_offset = start + len;
        self.mappings.push(Mapping {
            generated: Span::new(start, self.generated_offset),
            original,
            kind,
        });
    }

    pub fn build(mut self) -> SourceMap {
        self.mappings.sort_by_key(|m| m.generated.start);
        SourceMap {
            mappings: self.mappings,
        }
    }
}
