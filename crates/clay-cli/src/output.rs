//! Output formatting.

use crate::cli::OutputFormat;
use camino::Utf8PathBuf;
use clay_transformer::RuleKind;
use serde::Serialize;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Rewritten,
    Unchanged,
    Failed,
}

/// A rewritten declaration, located in its original file.
#[derive(Debug, Serialize)]
pub struct FormattedDeclaration {
    pub kind: RuleKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub exported: bool,
    /// The start position.
    pub start: Position,
}

/// A position in the source.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

/// The outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Path relative to the workspace.
    pub filename: Utf8PathBuf,
    pub status: FileStatus,
    pub declarations: Vec<FormattedDeclaration>,
    /// Files written for this input (code and, optionally, its map).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub written: Vec<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(filename: Utf8PathBuf, status: FileStatus) -> Self {
        Self {
            filename,
            status,
            declarations: Vec::new(),
            written: Vec::new(),
            error: None,
        }
    }

    pub fn failed(filename: Utf8PathBuf, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(filename, FileStatus::Failed)
        }
    }
}

/// Summary of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Number of files scanned.
    pub file_count: usize,
    /// Number of files with at least one rewrite.
    pub rewritten_count: usize,
    /// Number of declarations rewritten across all files.
    pub declaration_count: usize,
    /// Number of files that could not be read or written.
    pub failure_count: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self {
            file_count: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.status {
                FileStatus::Rewritten => {
                    summary.rewritten_count += 1;
                    summary.declaration_count += report.declarations.len();
                }
                FileStatus::Failed => summary.failure_count += 1,
                FileStatus::Unchanged => {}
            }
        }
        summary
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        let declaration_word = if self.declaration_count == 1 {
            "declaration"
        } else {
            "declarations"
        };
        let file_word = if self.file_count == 1 {
            "file"
        } else {
            "files"
        };

        let mut line = format!(
            "====================================\nclay rewrote {} {} in {} of {} {}",
            self.declaration_count,
            declaration_word,
            self.rewritten_count,
            self.file_count,
            file_word
        );
        if self.failure_count > 0 {
            line.push_str(&format!(" ({} failed)", self.failure_count));
        }
        line
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<&'a FileReport>,
    summary: RunSummary,
}

/// Formats run reports for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats every report worth showing plus the summary.
    pub fn format(&self, reports: &[FileReport], summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(reports, summary),
            OutputFormat::Json => self.format_json(reports, summary),
        }
    }

    /// Formats as human-readable output.
    fn format_human(&self, reports: &[FileReport], summary: &RunSummary) -> String {
        let mut output = String::new();

        for report in reports {
            match report.status {
                FileStatus::Rewritten => {
                    for decl in &report.declarations {
                        let target = decl
                            .target
                            .as_deref()
                            .map(|t| format!(" <{t}>"))
                            .unwrap_or_default();
                        output.push_str(&format!(
                            "{}:{}:{}\n{} {}{}\n\n",
                            report.filename,
                            decl.start.line,
                            decl.start.column,
                            kind_label(decl.kind),
                            decl.name,
                            target
                        ));
                    }
                }
                FileStatus::Failed => {
                    output.push_str(&format!(
                        "{}\nError: {}\n\n",
                        report.filename,
                        report.error.as_deref().unwrap_or("unknown failure")
                    ));
                }
                FileStatus::Unchanged => {}
            }
        }

        output.push_str(&summary.format());
        output
    }

    /// Formats as JSON output.
    fn format_json(&self, reports: &[FileReport], summary: &RunSummary) -> String {
        let report = JsonReport {
            files: reports
                .iter()
                .filter(|r| r.status != FileStatus::Unchanged)
                .collect(),
            summary: *summary,
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }
}

fn kind_label(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Element => "Element",
        RuleKind::Extension => "Extension",
        RuleKind::GlobalStyle => "Global style",
    }
}
