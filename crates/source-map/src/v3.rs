//! Source Map v3 encoding.
//!
//! Produces the JSON artifact bundlers expect from a `transform` hook. The
//! encoding is high resolution: verbatim text gets one segment per character and
//! synthetic text gets a segment at its start and at the start of every line it
//! spans, so any generated column resolves to an original position.

use crate::{LineCol, LineIndex, MappingKind, SourceMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Failure while serialising a map.
pub use sourcemap::Error as EncodeError;

/// A Source Map revision 3 document for a single rewritten module.
#[derive(Debug, Clone)]
pub struct SourceMapV3 {
    map: sourcemap::SourceMap,
}

impl SourceMapV3 {
    /// Encodes `map`, which relates `generated` back to `original`, the text of
    /// the module named `source`.
    pub fn encode(map: &SourceMap, generated: &str, original: &str, source: &str) -> Self {
        let generated_index = LineIndex::new(generated);
        let original_index = LineIndex::new(original);

        let mut builder = sourcemap::SourceMapBuilder::new(None);
        let src_id = builder.add_source(source.into());
        builder.set_source_contents(src_id, Some(original.into()));

        let mut segment = |generated: LineCol, original: LineCol| {
            builder.add_raw(
                generated.line,
                generated.col,
                original.line,
                original.col,
                Some(src_id),
                None,
                false,
            );
        };

        for mapping in map.mappings() {
            let (Some(mut gen_pos), Some(mut orig_pos)) = (
                generated_index.line_col(mapping.generated.start),
                original_index.line_col(mapping.original.start),
            ) else {
                continue;
            };
            let Some(text) = generated.get(mapping.generated.range()) else {
                continue;
            };

            let mut at_line_start = true;
            for ch in text.chars() {
                if ch == '\n' {
                    gen_pos = LineCol::new(gen_pos.line + 1, 0);
                    if mapping.kind == MappingKind::Verbatim {
                        orig_pos = LineCol::new(orig_pos.line + 1, 0);
                    }
                    at_line_start = true;
                    continue;
                }

                if mapping.kind == MappingKind::Verbatim || at_line_start {
                    segment(gen_pos, orig_pos);
                }
                at_line_start = false;

                let width = ch.len_utf16() as u32;
                gen_pos.col += width;
                if mapping.kind == MappingKind::Verbatim {
                    orig_pos.col += width;
                }
            }
        }

        Self {
            map: builder.into_sourcemap(),
        }
    }

    pub fn with_file(mut self, file: &str) -> Self {
        self.map.set_file(Some(file));
        self
    }

    /// The underlying map, for token lookups.
    pub fn as_sourcemap(&self) -> &sourcemap::SourceMap {
        &self.map
    }

    pub fn to_json(&self) -> Result<String, EncodeError> {
        let mut buf = Vec::new();
        self.map.to_writer(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Renders the map as a `data:` URL suitable for an inline
    /// `//# sourceMappingURL=` comment.
    pub fn to_data_url(&self) -> Result<String, EncodeError> {
        let json = self.to_json()?;
        Ok(format!(
            "data:application/json;charset=utf-8;base64,{}",
            STANDARD.encode(json)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SourceMapBuilder, Span};
    use pretty_assertions::assert_eq;
    use text_size::TextSize;

    fn json(v3: &SourceMapV3) -> serde_json::Value {
        serde_json::from_str(&v3.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_verbatim_is_per_character() {
        let mut builder = SourceMapBuilder::new();
        builder.add_source(TextSize::from(0), "ab");
        let v3 = SourceMapV3::encode(&builder.build(), "ab", "ab", "a.tsx");
        assert_eq!(json(&v3)["mappings"], "AAAA,CAAC");
    }

    #[test]
    fn test_unmapped_header_line_is_empty() {
        let mut builder = SourceMapBuilder::new();
        builder.add_generated("x\n");
        builder.add_source(TextSize::from(0), "ab");
        let v3 = SourceMapV3::encode(&builder.build(), "x\nab", "ab", "a.tsx");
        assert_eq!(json(&v3)["mappings"], ";AAAA,CAAC");
    }

    #[test]
    fn test_synthetic_segments_per_line() {
        let mut builder = SourceMapBuilder::new();
        builder.add_synthetic(Span::new(0u32, 12u32), "foo\nbar");
        let v3 = SourceMapV3::encode(&builder.build(), "foo\nbar", "const A = 1;", "a.tsx");
        assert_eq!(json(&v3)["mappings"], "AAAA;AAAA");
    }

    #[test]
    fn test_multibyte_columns_are_utf16() {
        let mut builder = SourceMapBuilder::new();
        builder.add_source(TextSize::from(0), "é😀x");
        let v3 = SourceMapV3::encode(&builder.build(), "é😀x", "é😀x", "a.tsx");
        let cols: Vec<_> = v3
            .as_sourcemap()
            .tokens()
            .map(|t| (t.get_dst_col(), t.get_src_col()))
            .collect();
        assert_eq!(cols, vec![(0, 0), (1, 1), (3, 3)]);
    }

    #[test]
    fn test_json_shape() {
        let mut builder = SourceMapBuilder::new();
        builder.add_source(TextSize::from(0), "a");
        let v3 = SourceMapV3::encode(&builder.build(), "a", "a", "/src/a.tsx").with_file("a.js");
        let json = json(&v3);
        assert_eq!(json["version"], 3);
        assert_eq!(json["file"], "a.js");
        assert_eq!(json["sources"][0], "/src/a.tsx");
        assert_eq!(json["sourcesContent"][0], "a");
        assert_eq!(json["mappings"], "AAAA");
        assert!(v3
            .to_data_url()
            .unwrap()
            .starts_with("data:application/json;charset=utf-8;base64,"));
    }
}
