//! Main orchestration logic.

use crate::cli::{Args, SourceMapMode};
use crate::config::ClayConfig;
use crate::error::CliError;
use crate::output::{FileReport, FileStatus, FormattedDeclaration, Position, RunSummary};
use camino::{Utf8Path, Utf8PathBuf};
use clay_transformer::{ClayPlugin, RewrittenDeclaration, TransformOutput};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use source_map::{EncodeError, LineCol, LineIndex};
use std::fs;
use std::io;
use walkdir::WalkDir;

/// Patterns ignored on every run, on top of `--ignore` and the config's.
const DEFAULT_IGNORES: [&str; 2] = ["**/node_modules/**", "**/dist/**"];

/// Everything a run produced, one report per scanned file in path order.
#[derive(Debug)]
pub struct RunOutcome {
    pub reports: Vec<FileReport>,
    pub summary: RunSummary,
}

/// Runs the transform on all files.
pub fn run(args: &Args) -> Result<RunOutcome, CliError> {
    let workspace = resolve_workspace(&args.workspace)?;
    let config = load_config(args, &workspace)?;

    let mut options = config.transform.clone();
    if args.source_maps == SourceMapMode::None {
        options.source_maps = false;
    }
    let plugin = ClayPlugin::with_options(options)?;

    let ignore_set = build_ignore_set(args.ignore.iter().chain(&config.ignore))?;
    let out_dir = args
        .out_dir
        .as_ref()
        .or(config.out_dir.as_ref())
        .map(|dir| workspace.join(dir));

    let files = discover_files(&workspace, &ignore_set, out_dir.as_deref(), &plugin);
    tracing::debug!(count = files.len(), %workspace, "discovered candidate files");

    let job = FileJob {
        workspace: &workspace,
        out_dir: out_dir.as_deref(),
        source_maps: args.source_maps,
        emit: args.emit,
        plugin: &plugin,
    };
    let reports: Vec<FileReport> = files.par_iter().map(|path| job.process(path)).collect();
    let summary = RunSummary::from_reports(&reports);

    tracing::info!(
        files = summary.file_count,
        rewritten = summary.rewritten_count,
        declarations = summary.declaration_count,
        failed = summary.failure_count,
        "clay run finished"
    );

    Ok(RunOutcome { reports, summary })
}

fn resolve_workspace(path: &Utf8Path) -> Result<Utf8PathBuf, CliError> {
    let workspace = if path.is_relative() {
        let cwd = std::env::current_dir().map_err(|e| CliError::Workspace(e.to_string()))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| CliError::Workspace(e.to_string()))?;
        cwd.join(path)
    } else {
        path.to_owned()
    };

    if !workspace.is_dir() {
        return Err(CliError::Workspace(format!("{workspace} is not a directory")));
    }
    Ok(workspace)
}

fn load_config(args: &Args, workspace: &Utf8Path) -> Result<ClayConfig, CliError> {
    if let Some(path) = &args.config {
        return ClayConfig::load(path);
    }
    match ClayConfig::find(workspace)? {
        Some((path, config)) => {
            tracing::debug!(%path, "loaded config");
            Ok(config)
        }
        None => Ok(ClayConfig::default()),
    }
}

fn build_ignore_set<'a>(
    patterns: impl IntoIterator<Item = &'a String>,
) -> Result<GlobSet, CliError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns
        .into_iter()
        .map(String::as_str)
        .chain(DEFAULT_IGNORES)
    {
        let glob = Glob::new(pattern).map_err(|e| CliError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| CliError::InvalidGlob(e.to_string()))
}

/// Finds every eligible file under `workspace`, sorted by path.
fn discover_files(
    workspace: &Utf8Path,
    ignore_set: &GlobSet,
    out_dir: Option<&Utf8Path>,
    plugin: &ClayPlugin,
) -> Vec<Utf8PathBuf> {
    let mut files: Vec<Utf8PathBuf> = WalkDir::new(workspace)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
        // Never feed our own output back in.
        .filter(|p| out_dir.map_or(true, |dir| !p.starts_with(dir)))
        .filter(|p| {
            let relative = p.strip_prefix(workspace).unwrap_or(p);
            plugin.transformer().is_eligible(relative.as_str())
                && !ignore_set.is_match(relative.as_str())
        })
        .collect();
    files.sort();
    files
}

/// Per-run settings shared by every file.
struct FileJob<'a> {
    workspace: &'a Utf8Path,
    out_dir: Option<&'a Utf8Path>,
    source_maps: SourceMapMode,
    emit: bool,
    plugin: &'a ClayPlugin,
}

impl FileJob<'_> {
    fn process(&self, path: &Utf8Path) -> FileReport {
        let relative = self.relative(path);
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(%path, error = %e, "failed to read file");
                return FileReport::failed(relative, format!("failed to read file: {e}"));
            }
        };

        // The hook sees the same workspace-relative id that discovery filtered on,
        // so directories above the workspace never trip the vendor check.
        let Some(output) = self.plugin.transform(&source, relative.as_str()) else {
            tracing::trace!(%relative, "no clay declarations");
            return FileReport::new(relative, FileStatus::Unchanged);
        };

        let mut report = FileReport::new(relative, FileStatus::Rewritten);
        report.declarations = locate_declarations(&source, &output.declarations);

        let file_name = path.file_name().unwrap_or_default();
        let writes_files = self.out_dir.is_some();
        let (code, map_json) =
            match attach_source_map(output, self.source_maps, file_name, writes_files) {
                Ok(parts) => parts,
                Err(e) => return self.fail(report, format!("failed to encode source map: {e}")),
            };

        if let Some(out_dir) = self.out_dir {
            let dest = out_dir.join(&report.filename);
            match write_output(&dest, &code, map_json.as_deref()) {
                Ok(written) => {
                    report.written = written.iter().map(|p| self.relative(p)).collect();
                }
                Err(e) => return self.fail(report, format!("failed to write {dest}: {e}")),
            }
        }

        if self.emit {
            println!("=== {} ===\n{}", report.filename, code);
        }

        tracing::debug!(
            file = %report.filename,
            declarations = report.declarations.len(),
            "rewrote file"
        );
        report
    }

    fn relative(&self, path: &Utf8Path) -> Utf8PathBuf {
        path.strip_prefix(self.workspace).unwrap_or(path).to_owned()
    }

    fn fail(&self, mut report: FileReport, error: String) -> FileReport {
        tracing::warn!(file = %report.filename, %error, "file failed");
        report.status = FileStatus::Failed;
        report.error = Some(error);
        report
    }
}

/// 1-indexed start positions for each rewritten declaration.
fn locate_declarations(
    source: &str,
    declarations: &[RewrittenDeclaration],
) -> Vec<FormattedDeclaration> {
    let line_index = LineIndex::new(source);
    declarations
        .iter()
        .map(|decl| {
            let offset = decl.original.start;
            let start = line_index.line_col(offset).unwrap_or(LineCol::new(0, 0));
            FormattedDeclaration {
                kind: decl.kind,
                name: decl.name.to_string(),
                target: decl.target.as_ref().map(ToString::to_string),
                exported: decl.exported,
                start: Position {
                    line: start.line + 1,
                    column: start.col + 1,
                    offset: u32::from(offset),
                },
            }
        })
        .collect()
}

/// Returns the final code and, for `.map` files, the map JSON to write.
///
/// A `sourceMappingURL` comment is only added when the map actually reaches
/// the reader: inline always, as a file only when output is written.
fn attach_source_map(
    output: TransformOutput,
    mode: SourceMapMode,
    file_name: &str,
    writes_files: bool,
) -> Result<(String, Option<String>), EncodeError> {
    let TransformOutput { mut code, map, .. } = output;
    match (mode, map) {
        (SourceMapMode::Inline, Some(map)) => {
            code.push_str(&format!("\n//# sourceMappingURL={}\n", map.to_data_url()?));
            Ok((code, None))
        }
        (SourceMapMode::File, Some(map)) if writes_files => {
            let json = map.with_file(file_name).to_json()?;
            code.push_str(&format!("\n//# sourceMappingURL={file_name}.map\n"));
            Ok((code, Some(json)))
        }
        _ => Ok((code, None)),
    }
}

/// Writes `code` to `dest` and `map` to `dest.map`, creating directories.
fn write_output(dest: &Utf8Path, code: &str, map: Option<&str>) -> io::Result<Vec<Utf8PathBuf>> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, code)?;
    let mut written = vec![dest.to_owned()];

    if let Some(map) = map {
        let map_path = Utf8PathBuf::from(format!("{dest}.map"));
        fs::write(&map_path, map)?;
        written.push(map_path);
    }
    Ok(written)
}
