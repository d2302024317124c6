//! The bundler-facing plugin hook.

use crate::error::TransformError;
use crate::options::TransformOptions;
use crate::transform::{RewrittenDeclaration, Transformer};
use source_map::SourceMapV3;

/// When a plugin runs relative to the bundler's normal plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforce {
    Pre,
    Post,
}

/// Name and ordering of a plugin in the bundler chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub enforce: Option<Enforce>,
}

/// What the `transform` hook hands back to the bundler.
#[derive(Debug)]
pub struct TransformOutput {
    pub code: String,
    /// Source Map v3 artifact, absent when source maps are disabled.
    pub map: Option<SourceMapV3>,
    pub declarations: Vec<RewrittenDeclaration>,
}

/// The clay plugin: runs before CSS extraction and rewrites clay declarations
/// into the extraction library's literal-tag calls.
#[derive(Debug, Clone, Default)]
pub struct ClayPlugin {
    transformer: Transformer,
}

impl ClayPlugin {
    pub const NAME: &'static str = "vite-plugin-clay";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TransformOptions) -> Result<Self, TransformError> {
        Ok(Self {
            transformer: Transformer::new(options)?,
        })
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Clay must see modules before the extraction library does.
    pub fn enforce(&self) -> Enforce {
        Enforce::Pre
    }

    pub fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor {
            name: self.name(),
            enforce: Some(self.enforce()),
        }
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// The `transform(code, id)` hook. `None` means "leave the module alone".
    pub fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        let result = self.transformer.transform(code, id)?;
        let map = result
            .source_map
            .as_ref()
            .map(|map| SourceMapV3::encode(map, &result.code, code, id));

        Some(TransformOutput {
            code: result.code,
            map,
            declarations: result.declarations,
        })
    }
}

/// The full plugin chain clay needs, in order: clay's rewrite, then the
/// extraction library's own plugin.
pub fn unified_plugins() -> [PluginDescriptor; 2] {
    [
        ClayPlugin::new().descriptor(),
        PluginDescriptor {
            name: "ecsstatic",
            enforce: None,
        },
    ]
}
