//! Configuration loading.

use crate::error::CliError;
use camino::{Utf8Path, Utf8PathBuf};
use clay_transformer::TransformOptions;
use serde::Deserialize;
use std::fs;

/// File name looked up in the workspace root when `--config` is not given.
pub const CONFIG_FILE: &str = "clay.config.json";

/// Project configuration from `clay.config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClayConfig {
    /// Options handed to the transformer.
    pub transform: TransformOptions,

    /// Extra glob patterns to ignore, on top of the CLI's.
    pub ignore: Vec<String>,

    /// Output directory used when `--out-dir` is not given.
    pub out_dir: Option<Utf8PathBuf>,
}

impl ClayConfig {
    /// Loads configuration from a file. Comments are allowed.
    pub fn load(path: &Utf8Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Finds and loads `clay.config.json` from a project root.
    pub fn find(project_root: &Utf8Path) -> Result<Option<(Utf8PathBuf, Self)>, CliError> {
        let path = project_root.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path).map(|config| Some((path, config)))
        } else {
            Ok(None)
        }
    }

    fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(&remove_json_comments(content))
    }
}

/// Removes single-line and multi-line comments from JSON.
fn remove_json_comments(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if c == '"' {
                in_string = false;
            } else if c == '\\' {
                if let Some(next) = chars.next() {
                    result.push(next);
                }
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                result.push(c);
                in_string = true;
            }
            ('/', Some('/')) => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                while let Some(next) = chars.next() {
                    if next == '*' && chars.next_if_eq(&'/').is_some() {
                        break;
                    }
                }
            }
            _ => result.push(c),
        }
    }

    result
}
