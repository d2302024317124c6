//! Main transformation logic.

use crate::error::TransformError;
use crate::filter::{is_eligible, might_contain_clay};
use crate::imports::import_header;
use crate::options::TransformOptions;
use crate::render::{render_declaration, Emitter};
use crate::rules::{RuleKind, RuleSet, DEFAULT_RULES};
use smol_str::SmolStr;
use source_map::{SourceMap, Span};
use std::borrow::Cow;
use std::sync::LazyLock;

static DEFAULT_TRANSFORMER: LazyLock<Transformer> = LazyLock::new(Transformer::default);

/// A declaration that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RewrittenDeclaration {
    pub kind: RuleKind,
    pub name: SmolStr,
    /// Element tag or base component; absent for global styles.
    pub target: Option<SmolStr>,
    pub exported: bool,
    /// Byte range of the declaration in the original module.
    #[serde(skip)]
    pub original: Span,
    /// Byte range of its replacement in the rewritten module.
    #[serde(skip)]
    pub generated: Span,
}

/// The result of transformation.
#[derive(Debug)]
pub struct TransformResult {
    pub code: String,
    /// Mappings from `code` back to the original module. `None` when source
    /// maps are disabled.
    pub source_map: Option<SourceMap>,
    /// Every rewritten declaration, in source order.
    pub declarations: Vec<RewrittenDeclaration>,
    /// Number of import lines prepended (0, 1 or 2).
    pub imports_added: usize,
}

impl TransformResult {
    /// Total number of matches across all rules.
    pub fn match_count(&self) -> usize {
        self.declarations.len()
    }

    pub fn count_of(&self, kind: RuleKind) -> usize {
        self.declarations.iter().filter(|d| d.kind == kind).count()
    }
}

/// Rewrites clay declarations in JSX modules.
///
/// Holds no per-module state; one transformer can be shared across threads
/// and reused for any number of modules.
#[derive(Debug, Clone)]
pub struct Transformer {
    options: TransformOptions,
    rules: Cow<'static, RuleSet>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self {
            options: TransformOptions::default(),
            rules: Cow::Borrowed(&*DEFAULT_RULES),
        }
    }
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Result<Self, TransformError> {
        options.validate()?;
        let rules = if options.uses_default_patterns() {
            Cow::Borrowed(&*DEFAULT_RULES)
        } else {
            Cow::Owned(RuleSet::new(&options)?)
        };
        Ok(Self { options, rules })
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Returns true if the module at `id` would be considered at all.
    pub fn is_eligible(&self, id: &str) -> bool {
        is_eligible(id, &self.options.vendor_dir)
    }

    /// Transforms one module.
    ///
    /// Returns `None` when the module is ineligible, contains no candidate
    /// tokens or has no matching declaration; the caller keeps its original
    /// text in that case.
    pub fn transform(&self, code: &str, id: &str) -> Option<TransformResult> {
        if !self.is_eligible(id) {
            tracing::trace!(id, "skipping ineligible module");
            return None;
        }
        if !might_contain_clay(
            code,
            &self.options.namespace,
            &self.options.global_style_ident,
        ) {
            return None;
        }

        let matches = self.rules.find_matches(code);
        if matches.is_empty() {
            tracing::trace!(id, "no clay declarations matched");
            return None;
        }

        let header = import_header(code, &matches, &self.options);
        let imports_added = header.lines().count();

        let mut out = Emitter::new(code, self.options.source_maps);
        out.unmapped(&header);

        let mut declarations = Vec::with_capacity(matches.len());
        let mut cursor = 0usize;
        for found in &matches {
            let range = found.span.range();
            out.copy(Span::from_range(cursor..range.start));

            let generated_start = out.len();
            render_declaration(&mut out, found, &self.options);
            declarations.push(RewrittenDeclaration {
                kind: found.kind,
                name: SmolStr::new(found.name.text),
                target: found.target.map(|t| SmolStr::new(t.text)),
                exported: found.exported,
                original: found.span,
                generated: Span::from_range(generated_start..out.len()),
            });

            cursor = range.end;
        }
        out.copy(Span::from_range(cursor..code.len()));

        let (code, source_map) = out.finish();
        tracing::debug!(
            id,
            declarations = declarations.len(),
            imports_added,
            "rewrote clay declarations"
        );

        Some(TransformResult {
            code,
            source_map,
            declarations,
            imports_added,
        })
    }
}

/// Transforms one module with the default options.
pub fn transform(code: &str, id: &str) -> Option<TransformResult> {
    DEFAULT_TRANSFORMER.transform(code, id)
}
