//! Tests for source map accuracy.
//!
//! These tests verify that positions in rewritten output map back to their
//! original positions, both through the in-memory map and through the encoded
//! Source Map v3 document as the `sourcemap` crate reads it.

use clay_transformer::{transform, ClayPlugin, RuleKind, TransformOutput};
use source_map::{ByteOffset, LineIndex};

fn offset(value: usize) -> ByteOffset {
    ByteOffset::from(value as u32)
}

/// Transforms `source` and checks that `needle` in the output maps back to
/// `needle` in the source, for every byte.
fn verify_verbatim(source: &str, needle: &str) {
    let result = transform(source, "/Test.tsx").expect("source should be rewritten");
    let map = result.source_map.expect("source maps are on by default");

    let generated = result
        .code
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in output:\n{}", result.code));
    let original = source.find(needle).unwrap();

    for k in 0..needle.len() {
        assert_eq!(
            map.original_position(offset(generated + k)),
            Some(offset(original + k)),
            "byte {k} of `{needle}` maps to the wrong place"
        );
    }
}

#[test]
fn test_literal_body_maps_exactly() {
    verify_verbatim(
        "const Button = clay.button`\n  padding: 1rem;\n  color: red;\n`;",
        "\n  padding: 1rem;\n  color: red;\n",
    );
}

#[test]
fn test_binding_name_and_tag_map_exactly() {
    let source = "const Fancy = clay.section`margin: 0;`;";
    verify_verbatim(source, "Fancy");
    verify_verbatim(source, "section");
}

#[test]
fn test_code_after_rewrites_keeps_its_line() {
    let source = "const A = clay.div`\n  a: 1;\n`;\nconst B = clay.span`b: 2;`;\nfunction after() {}\n";
    let result = transform(source, "/Test.tsx").unwrap();
    let map = result.source_map.unwrap();

    let generated = result.code.find("function after").unwrap();
    let original = map.original_position(offset(generated)).unwrap();
    let line = LineIndex::new(source).line_col(original).unwrap().line;
    assert_eq!(line, 4);
}

#[test]
fn test_every_replacement_traces_to_its_declaration() {
    let source = "const A = clay.div`a`;\n\
                  const B = clay.span`b`;\n\
                  const C = clay(A)`c`;\n\
                  const D = clay(B)`d`;\n\
                  const E = clay.p`e`;\n";
    let result = transform(source, "/Test.tsx").unwrap();
    let map = result.source_map.as_ref().unwrap();

    let elements = result.count_of(RuleKind::Element);
    let extensions = result.count_of(RuleKind::Extension);
    assert_eq!((elements, extensions), (3, 2));
    assert_eq!(result.code.matches("((c) => (props) =>").count(), 5);

    for decl in &result.declarations {
        let start = map.original_position(decl.generated.start).unwrap();
        assert_eq!(start, decl.original.start, "{} does not trace back", decl.name);
        assert!(result.code[decl.generated.range()].contains(decl.name.as_str()));
    }
}

#[test]
fn test_injected_import_is_unmapped() {
    let result = transform("const A = clay.div`a`;", "/Test.tsx").unwrap();
    let map = result.source_map.unwrap();
    let header_len = result.code.find("const A").unwrap();
    for k in 0..header_len {
        assert_eq!(map.original_position(offset(k)), None);
    }
}

/// Serialises the hook's map, reads it back with the `sourcemap` crate and
/// lists its tokens as `(gen_line, gen_col, orig_line, orig_col)`.
fn decoded_segments(output: &TransformOutput) -> Vec<(u32, u32, u32, u32)> {
    let json = output.map.as_ref().unwrap().to_json().unwrap();
    let decoded = sourcemap::SourceMap::from_slice(json.as_bytes()).unwrap();
    decoded
        .tokens()
        .map(|t| (t.get_dst_line(), t.get_dst_col(), t.get_src_line(), t.get_src_col()))
        .collect()
}

#[test]
fn test_v3_body_characters_have_segments() {
    let source = "const Box = clay.div`color:red;`;";
    let output = ClayPlugin::new().transform(source, "/Box.tsx").unwrap();
    let segments = decoded_segments(&output);

    // Line 0 is the import; the rewrite is on line 1.
    let line = output.code.lines().nth(1).unwrap();
    let body_col = line.find("color:red;").unwrap() as u32;
    let original_col = source.find("color:red;").unwrap() as u32;

    for k in 0.."color:red;".len() as u32 {
        assert!(
            segments.contains(&(1, body_col + k, 0, original_col + k)),
            "no segment for body column {}",
            body_col + k
        );
    }
    // Scaffolding starts a segment pointing at the declaration start.
    assert!(segments.contains(&(1, 0, 0, 0)));
}

#[test]
fn test_v3_global_style_second_line_is_attributed() {
    let source = "\nexport const G = createGlobalStyle`body{}`;";
    let output = ClayPlugin::new().transform(source, "/G.tsx").unwrap();
    let segments = decoded_segments(&output);

    // import, blank line, alias call, then `export const G = ...`.
    assert_eq!(output.code.lines().nth(3), Some("export const G = () => null;"));
    assert!(segments.contains(&(3, 0, 1, 0)));
}
