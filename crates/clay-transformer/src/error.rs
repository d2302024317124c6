//! Error types.

use thiserror::Error;

/// An error building a transformer from options.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// An option spliced into generated code as an identifier is not one.
    #[error("invalid `{option}` option: `{value}` is not a JavaScript identifier")]
    InvalidIdentifier {
        /// The option name, as spelled in config files.
        option: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The library specifier cannot be placed inside a string literal.
    #[error("invalid `library` option: `{0}` must be a non-empty module specifier without quotes")]
    InvalidLibrary(String),

    /// The global-style alias would shadow the identifier it stands in for.
    #[error("`globalStyleAlias` must differ from `globalStyleIdent` (both are `{0}`)")]
    AliasCollision(String),

    /// A rule pattern failed to compile.
    #[error("failed to compile rule pattern: {0}")]
    Pattern(#[from] regex::Error),
}
