//! CLI errors.

use camino::Utf8PathBuf;
use clay_transformer::TransformError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that stop a run before any file is transformed.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// The workspace path could not be resolved.
    #[error("invalid workspace: {0}")]
    #[diagnostic(code(clay::workspace))]
    Workspace(String),

    /// Failed to read the config file.
    #[error("failed to read {path}")]
    #[diagnostic(code(clay::config::read))]
    ConfigRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for a clay config.
    #[error("failed to parse {path}")]
    #[diagnostic(
        code(clay::config::parse),
        help("clay.config.json takes `transform`, `ignore` and `outDir` keys")
    )]
    ConfigParse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Transform options were rejected.
    #[error(transparent)]
    #[diagnostic(code(clay::options))]
    Options(#[from] TransformError),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    #[diagnostic(code(clay::glob))]
    InvalidGlob(String),
}
