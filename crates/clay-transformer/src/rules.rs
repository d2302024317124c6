//! The three rewrite rules and their compiled patterns.

use crate::error::TransformError;
use crate::options::TransformOptions;
use crate::const_decls::ConstDeclarations;
use regex::{Captures, Regex};
use source_map::Span;
use std::sync::LazyLock;

/// Rule set for the default options, compiled once and shared by every
/// transformer that does not rename the namespace or global-style identifier.
pub(crate) static DEFAULT_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(&TransformOptions::default()).expect("default clay rule patterns compile")
});

/// Which declaration form a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// `const Name = clay.tag`...``
    Element,
    /// `const Name = clay(Base)`...``
    Extension,
    /// `const Name = createGlobalStyle`...``
    GlobalStyle,
}

impl RuleKind {
    /// Rules in application order.
    pub const ALL: [RuleKind; 3] = [RuleKind::Element, RuleKind::Extension, RuleKind::GlobalStyle];

    /// Whether rewrites of this kind call the library's `css` tag.
    pub fn uses_css(self) -> bool {
        matches!(self, RuleKind::Element | RuleKind::Extension)
    }
}

/// A piece of a match: the matched text and where it sits in the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// One declaration matched by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationMatch<'a> {
    pub kind: RuleKind,
    /// The whole declaration, from `export`/`const` through the closing
    /// backtick and an optional trailing `;`.
    pub span: Span,
    pub exported: bool,
    pub name: Capture<'a>,
    /// The element tag or base component. `None` for global styles.
    pub target: Option<Capture<'a>>,
    /// The raw text between the backticks.
    pub body: Capture<'a>,
}

/// Compiled patterns for all three rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    element: Regex,
    extension: Regex,
    global_style: Regex,
}

// Shared pieces. The body stops at the first backtick; interpolations are
// rejected after matching.
const BINDING: &str = r"(?P<export>\bexport\s+)?(?P<keyword>\bconst)\s+(?P<name>[\w$]+)\s*=\s*";
const LITERAL: &str = r"`(?P<body>[^`]*)`;?";

impl RuleSet {
    pub fn new(options: &TransformOptions) -> Result<Self, TransformError> {
        let namespace = regex::escape(&options.namespace);
        let global_style = regex::escape(&options.global_style_ident);

        Ok(Self {
            element: Regex::new(&format!(
                r"{BINDING}{namespace}\.(?P<target>[\w$]+){LITERAL}"
            ))?,
            extension: Regex::new(&format!(
                r"{BINDING}{namespace}\((?P<target>[\w$]+)\){LITERAL}"
            ))?,
            global_style: Regex::new(&format!(r"{BINDING}{global_style}{LITERAL}"))?,
        })
    }

    fn pattern(&self, kind: RuleKind) -> &Regex {
        match kind {
            RuleKind::Element => &self.element,
            RuleKind::Extension => &self.extension,
            RuleKind::GlobalStyle => &self.global_style,
        }
    }

    /// Applies every rule, in order, across the whole of `text`.
    ///
    /// Returns accepted matches sorted by position. A match is dropped when its
    /// body interpolates, when its `const` is not a declaration in the parsed
    /// module (comments, strings, template or JSX text), or when it overlaps a
    /// match accepted earlier. A match dropped for not being a declaration may
    /// have run its literal into real code, so the search resumes right after
    /// its `const` rather than after the whole match.
    pub fn find_matches<'a>(&self, text: &'a str) -> Vec<DeclarationMatch<'a>> {
        let mut declarations: Option<ConstDeclarations> = None;
        let mut accepted: Vec<DeclarationMatch<'a>> = Vec::new();

        for kind in RuleKind::ALL {
            let pattern = self.pattern(kind);
            let mut pos = 0;
            while let Some(caps) = pattern.captures_at(text, pos) {
                let (Some(whole), Some(keyword)) = (caps.get(0), caps.name("keyword")) else {
                    break;
                };
                pos = whole.end();
                let Some(found) = DeclarationMatch::from_captures(kind, &caps) else {
                    continue;
                };

                if found.body.text.contains("${") {
                    tracing::debug!(
                        name = found.name.text,
                        "skipping clay declaration with interpolated literal"
                    );
                    continue;
                }

                let declarations =
                    declarations.get_or_insert_with(|| ConstDeclarations::parse(text));
                if !declarations.contains(keyword.start()) {
                    tracing::trace!(name = found.name.text, "skipping match outside a declaration");
                    pos = keyword.end();
                    continue;
                }

                if accepted.iter().any(|prior| prior.span.overlaps(found.span)) {
                    tracing::trace!(name = found.name.text, "skipping overlapping match");
                    continue;
                }

                accepted.push(found);
            }
        }

        accepted.sort_by_key(|m| m.span.start);
        accepted
    }
}

impl<'a> DeclarationMatch<'a> {
    fn from_captures(kind: RuleKind, caps: &Captures<'a>) -> Option<Self> {
        let capture = |group: &str| {
            caps.name(group).map(|m| Capture {
                text: m.as_str(),
                span: Span::from_range(m.range()),
            })
        };

        Some(Self {
            kind,
            span: Span::from_range(caps.get(0)?.range()),
            exported: caps.name("export").is_some(),
            name: capture("name")?,
            target: capture("target"),
            body: capture("body")?,
        })
    }
}
