//! Rewrite templates and the output buffer they write into.

use crate::options::TransformOptions;
use crate::rules::{DeclarationMatch, RuleKind};
use source_map::{SourceMap, SourceMapBuilder, Span};

/// Name the library's plain literal-tag call is imported under.
pub(crate) const CSS_TAG: &str = "css";

/// Rewritten text plus, optionally, the mappings back to the original.
pub(crate) struct Emitter<'a> {
    original: &'a str,
    code: String,
    map: Option<SourceMapBuilder>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(original: &'a str, source_maps: bool) -> Self {
        Self {
            original,
            code: String::with_capacity(original.len() + original.len() / 2),
            map: source_maps.then(SourceMapBuilder::new),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.code.len()
    }

    /// Appends text that has no counterpart in the original module.
    pub(crate) fn unmapped(&mut self, text: &str) {
        self.code.push_str(text);
        if let Some(map) = &mut self.map {
            map.add_generated(text);
        }
    }

    /// Copies `span` of the original module unchanged.
    pub(crate) fn copy(&mut self, span: Span) {
        let text = &self.original[span.range()];
        self.code.push_str(text);
        if let Some(map) = &mut self.map {
            map.add_source(span.start, text);
        }
    }

    /// Appends template text standing in for `origin`.
    pub(crate) fn synth(&mut self, origin: Span, text: &str) {
        self.code.push_str(text);
        if let Some(map) = &mut self.map {
            map.add_synthetic(origin, text);
        }
    }

    pub(crate) fn finish(self) -> (String, Option<SourceMap>) {
        (self.code, self.map.map(SourceMapBuilder::build))
    }
}

/// Writes the replacement for one matched declaration.
///
/// Names, targets and literal bodies are copied from the original so they map
/// back byte for byte; everything else is template text.
pub(crate) fn render_declaration(
    out: &mut Emitter<'_>,
    found: &DeclarationMatch<'_>,
    options: &TransformOptions,
) {
    match (found.kind, found.target) {
        (RuleKind::Element | RuleKind::Extension, Some(target)) => {
            render_component(out, found, target.span)
        }
        _ => render_global_style(out, found, &options.global_style_alias),
    }
}

/// `const Name = ((c) => (props) => <Target ... />)(css`body`);`
fn render_component(out: &mut Emitter<'_>, found: &DeclarationMatch<'_>, target: Span) {
    let origin = found.span;
    if found.exported {
        out.synth(origin, "export ");
    }
    out.synth(origin, "const ");
    out.copy(found.name.span);
    out.synth(origin, " = ((c) => (props) => <");
    out.copy(target);
    out.synth(
        origin,
        &format!(
            " {{...props}} className={{props.className ? props.className + ' ' + c : c}} />)({CSS_TAG}`"
        ),
    );
    out.copy(found.body.span);
    out.synth(origin, "`);");
}

/// `alias`body`;` followed by `const Name = () => null;`
fn render_global_style(out: &mut Emitter<'_>, found: &DeclarationMatch<'_>, alias: &str) {
    let origin = found.span;
    out.synth(origin, &format!("{alias}`"));
    out.copy(found.body.span);
    out.synth(origin, "`;\n");
    if found.exported {
        out.synth(origin, "export ");
    }
    out.synth(origin, "const ");
    out.copy(found.name.span);
    out.synth(origin, " = () => null;");
}
