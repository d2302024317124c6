//! Finds the `const` keywords that start real declarations.
//!
//! The rule patterns are textual, so they also hit `const` inside comments,
//! strings, template text, JSX text and regex literals. Parsing the module
//! with swc and recording the start of every `const` declaration in the tree
//! tells the two apart.

use rustc_hash::FxHashSet;
use std::sync::Arc;
use swc_common::{BytePos, FileName, SourceFile, SourceMap};
use swc_ecma_ast::{Module, VarDecl, VarDeclKind};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

/// Byte offsets at which a `const` declaration begins.
#[derive(Debug)]
pub(crate) struct ConstDeclarations {
    /// `None` when the module did not parse; every offset is then accepted.
    starts: Option<FxHashSet<u32>>,
}

impl ConstDeclarations {
    pub(crate) fn parse(text: &str) -> Self {
        let cm: Arc<SourceMap> = Default::default();
        let fm = cm.new_source_file(
            FileName::Custom("clay-module.tsx".into()).into(),
            text.to_string(),
        );

        let Some(module) = parse_module(&fm) else {
            tracing::debug!("module does not parse, keeping every textual match");
            return Self { starts: None };
        };

        let mut collector = ConstCollector {
            file_start: fm.start_pos,
            starts: FxHashSet::default(),
        };
        module.visit_with(&mut collector);
        Self {
            starts: Some(collector.starts),
        }
    }

    /// Returns true if a `const` declaration starts at `offset`.
    pub(crate) fn contains(&self, offset: usize) -> bool {
        match &self.starts {
            Some(starts) => u32::try_from(offset).is_ok_and(|offset| starts.contains(&offset)),
            None => true,
        }
    }
}

/// Parses as TSX first, then as plain JSX for `.jsx` modules using syntax the
/// TypeScript grammar rejects.
fn parse_module(fm: &SourceFile) -> Option<Module> {
    let tsx = Syntax::Typescript(TsSyntax {
        tsx: true,
        ..Default::default()
    });
    let jsx = Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
    });

    [tsx, jsx].into_iter().find_map(|syntax| {
        let mut parser = Parser::new(syntax, StringInput::from(fm), None);
        parser.parse_module().ok()
    })
}

struct ConstCollector {
    file_start: BytePos,
    starts: FxHashSet<u32>,
}

impl Visit for ConstCollector {
    fn visit_var_decl(&mut self, decl: &VarDecl) {
        if decl.kind == VarDeclKind::Const {
            self.starts.insert(decl.span.lo.0 - self.file_start.0);
        }
        decl.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_declaration_at(text: &str, needle: &str, nth: usize) -> bool {
        let offset = text
            .match_indices(needle)
            .nth(nth)
            .map(|(offset, _)| offset)
            .unwrap_or_else(|| panic!("`{needle}` #{nth} not in text"));
        ConstDeclarations::parse(text).contains(offset)
    }

    #[test]
    fn test_plain_and_exported() {
        let text = "const A = clay.div`x`;\nexport const B = clay.p`y`;";
        assert!(is_declaration_at(text, "const", 0));
        assert!(is_declaration_at(text, "const", 1));
        assert!(!is_declaration_at(text, "export", 0));
    }

    #[test]
    fn test_comments() {
        let text = "// const A = clay.div`x`;\n/*\n const B = clay.div`x`;\n*/ const C = 1;";
        assert!(!is_declaration_at(text, "const", 0));
        assert!(!is_declaration_at(text, "const", 1));
        assert!(is_declaration_at(text, "const", 2));
    }

    #[test]
    fn test_strings_and_templates() {
        let text = r#"const s = "const A = clay.div`x`"; const t = `a ${ {k: 1}.k } const b`; const C = 1;"#;
        assert!(!is_declaration_at(text, "const", 1));
        assert!(!is_declaration_at(text, "const", 3));
        assert!(is_declaration_at(text, "const", 4));
    }

    #[test]
    fn test_nested_scopes() {
        let text = "function f() {\n  if (x) {\n    const Inner = clay.div`x`;\n  }\n}";
        assert!(is_declaration_at(text, "const", 0));
    }

    #[test]
    fn test_jsx_text() {
        let text = "export function Help() {\n  return <p>Matches src/*.tsx files, don't const X</p>;\n}\nconst Y = 1;";
        assert!(!is_declaration_at(text, "const", 0));
        assert!(is_declaration_at(text, "const", 1));
    }

    #[test]
    fn test_regex_after_return() {
        let text = "function isTick(s) {\n  return /`/.test(s);\n}\nconst Box = 1;";
        assert!(is_declaration_at(text, "const", 0));
    }

    #[test]
    fn test_division_and_regex_with_quote() {
        let text = "const half = total / 2; const r = /'[/]/g; const X = 1;";
        assert!(is_declaration_at(text, "const", 1));
        assert!(is_declaration_at(text, "const", 2));
    }

    #[test]
    fn test_unparseable_module_accepts_everything() {
        let decls = ConstDeclarations::parse("const A = clay.div`x`;\nfunction (");
        assert!(decls.starts.is_none());
        assert!(decls.contains(0));
        assert!(decls.contains(7));
    }
}
