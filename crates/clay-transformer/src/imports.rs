//! Import lines prepended to rewritten modules.

use crate::options::TransformOptions;
use crate::render::CSS_TAG;
use crate::rules::{DeclarationMatch, RuleKind};

/// `import { css } from "<library>";`
pub fn css_import(options: &TransformOptions) -> String {
    format!("import {{ {CSS_TAG} }} from \"{}\";\n", options.library)
}

/// `import { createGlobalStyle as <alias> } from "<library>";`
pub fn global_style_import(options: &TransformOptions) -> String {
    format!(
        "import {{ {} as {} }} from \"{}\";\n",
        options.global_style_ident, options.global_style_alias, options.library
    )
}

/// Builds the import lines the rewritten module needs, css import first.
///
/// The css import is skipped when the module already imports from the
/// library; the global-style import is skipped when its aliased specifier is
/// already present.
pub(crate) fn import_header(
    original: &str,
    matches: &[DeclarationMatch<'_>],
    options: &TransformOptions,
) -> String {
    let mut header = String::new();

    if matches.iter().any(|m| m.kind.uses_css()) && !imports_from(original, &options.library) {
        header.push_str(&css_import(options));
    }

    let aliased = format!(
        "{} as {}",
        options.global_style_ident, options.global_style_alias
    );
    if matches.iter().any(|m| m.kind == RuleKind::GlobalStyle) && !original.contains(&aliased) {
        header.push_str(&global_style_import(options));
    }

    header
}

fn imports_from(text: &str, library: &str) -> bool {
    text.contains(&format!("from \"{library}\"")) || text.contains(&format!("from '{library}'"))
}
