//! Source position tracking for clay rewrites.
//!
//! The transformer records, for every byte it emits, where that byte came from in
//! the original module. This crate holds the span and line types used for that
//! bookkeeping, the [`SourceMapBuilder`] that collects mappings while output is
//! written, and the [`SourceMapV3`] encoder that turns them into the JSON artifact
//! bundlers consume, built on the `sourcemap` crate.

mod builder;
mod line_index;
mod span;
mod v3;

pub use builder::{Mapping, MappingKind, SourceMap, SourceMapBuilder};
pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
pub use v3::{EncodeError, SourceMapV3};
