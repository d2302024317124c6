//! Transformer configuration.

use crate::error::TransformError;
use serde::Deserialize;

/// Identifier that user code reaches clay through (`clay.div`, `clay(Button)`).
pub const DEFAULT_NAMESPACE: &str = "clay";
/// Module that provides the `css` and global-style tag calls.
pub const DEFAULT_LIBRARY: &str = "@acab/ecsstatic";
/// Identifier of the global-style tag in both clay and the extraction library.
pub const DEFAULT_GLOBAL_STYLE_IDENT: &str = "createGlobalStyle";
/// Local name the library's global-style tag is imported under, so it cannot
/// collide with clay's own `createGlobalStyle` stand-in.
pub const DEFAULT_GLOBAL_STYLE_ALIAS: &str = "__clayCreateGlobalStyle";
/// Directory segment whose files are never transformed.
pub const DEFAULT_VENDOR_DIR: &str = "node_modules";

/// Options for transformation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    pub namespace: String,
    pub library: String,
    pub global_style_ident: String,
    pub global_style_alias: String,
    pub vendor_dir: String,
    /// Whether to build a source map alongside the rewritten code.
    pub source_maps: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            library: DEFAULT_LIBRARY.to_string(),
            global_style_ident: DEFAULT_GLOBAL_STYLE_IDENT.to_string(),
            global_style_alias: DEFAULT_GLOBAL_STYLE_ALIAS.to_string(),
            vendor_dir: DEFAULT_VENDOR_DIR.to_string(),
            source_maps: true,
        }
    }
}

impl TransformOptions {
    /// Checks that every option can be spliced into generated code.
    pub fn validate(&self) -> Result<(), TransformError> {
        for (option, value) in [
            ("namespace", &self.namespace),
            ("globalStyleIdent", &self.global_style_ident),
            ("globalStyleAlias", &self.global_style_alias),
        ] {
            if !is_identifier(value) {
                return Err(TransformError::InvalidIdentifier {
                    option,
                    value: value.clone(),
                });
            }
        }

        if self.library.is_empty() || self.library.contains(|c: char| matches!(c, '"' | '\'' | '\n')) {
            return Err(TransformError::InvalidLibrary(self.library.clone()));
        }

        if self.global_style_alias == self.global_style_ident {
            return Err(TransformError::AliasCollision(self.global_style_alias.clone()));
        }

        Ok(())
    }

    /// Returns true when the rule patterns are the ones compiled into the
    /// shared default rule set.
    pub(crate) fn uses_default_patterns(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE && self.global_style_ident == DEFAULT_GLOBAL_STYLE_IDENT
    }
}

/// Returns true if `value` is a plain JavaScript identifier.
pub(crate) fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = TransformOptions::default();
        assert!(options.validate().is_ok());
        assert!(options.uses_default_patterns());
        assert!(options.source_maps);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("clay"));
        assert!(is_identifier("_Card3D"));
        assert!(is_identifier("$styled"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("3d"));
        assert!(!is_identifier("clay.div"));
    }

    #[test]
    fn test_rejects_bad_namespace() {
        let options = TransformOptions {
            namespace: "cl ay".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(TransformError::InvalidIdentifier { option: "namespace", .. })
        ));
    }

    #[test]
    fn test_rejects_quoted_library() {
        let options = TransformOptions {
            library: "evil\"lib".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(TransformError::InvalidLibrary(_))
        ));
    }

    #[test]
    fn test_rejects_alias_equal_to_ident() {
        let options = TransformOptions {
            global_style_alias: "createGlobalStyle".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(TransformError::AliasCollision(_))
        ));
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let options: TransformOptions =
            serde_json::from_str(r#"{ "namespace": "styled", "sourceMaps": false }"#).unwrap();
        assert_eq!(options.namespace, "styled");
        assert_eq!(options.library, DEFAULT_LIBRARY);
        assert!(!options.source_maps);
        assert!(!options.uses_default_patterns());
    }
}
