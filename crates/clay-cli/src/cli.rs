//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Rewrites clay styled-component declarations into ecsstatic css calls.
#[derive(Debug, Parser)]
#[command(name = "clay")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Project root to scan
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// Write rewritten files under this directory, mirroring the workspace layout
    #[arg(long = "out-dir")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Print rewritten code to stdout (for debugging)
    #[arg(long)]
    pub emit: bool,

    /// How source maps are delivered
    #[arg(long = "source-maps", value_enum, default_value = "file")]
    pub source_maps: SourceMapMode,

    /// Summary format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Path to a clay.config.json (defaults to the one in the workspace root)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}

/// Source map delivery.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SourceMapMode {
    /// No source maps
    None,
    /// A `.map` file next to each written file (default)
    #[default]
    File,
    /// A base64 data URL appended to the code
    Inline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["clay"]);
        assert_eq!(args.workspace.as_str(), ".");
        assert_eq!(args.output, OutputFormat::Human);
        assert_eq!(args.source_maps, SourceMapMode::File);
        assert!(args.out_dir.is_none());
        assert!(!args.emit);
    }

    #[test]
    fn test_custom_workspace_and_out_dir() {
        let args = Args::parse_from([
            "clay",
            "--workspace",
            "/path/to/project",
            "--out-dir",
            "build/clay",
        ]);
        assert_eq!(args.workspace.as_str(), "/path/to/project");
        assert_eq!(args.out_dir.as_deref().map(|p| p.as_str()), Some("build/clay"));
    }

    #[test]
    fn test_source_map_modes() {
        let args = Args::parse_from(["clay", "--source-maps", "inline"]);
        assert_eq!(args.source_maps, SourceMapMode::Inline);

        let args = Args::parse_from(["clay", "--source-maps", "none"]);
        assert_eq!(args.source_maps, SourceMapMode::None);
    }

    #[test]
    fn test_repeated_ignore_and_verbose() {
        let args = Args::parse_from([
            "clay",
            "--ignore",
            "**/*.stories.tsx",
            "--ignore",
            "legacy/**",
            "-v",
            "--output",
            "json",
        ]);
        assert_eq!(args.ignore, vec!["**/*.stories.tsx", "legacy/**"]);
        assert!(args.verbose);
        assert_eq!(args.output, OutputFormat::Json);
    }
}
