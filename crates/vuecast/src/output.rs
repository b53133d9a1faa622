//! Output formatting.

use crate::cli::OutputFormat;
use camino::Utf8Path;
use serde::Serialize;
use vue_astro_diagnostics::{Diagnostic, Severity};
use vue_template_parser::{LineCol, LineIndex};

/// A formatted diagnostic for output.
#[derive(Debug, Serialize)]
pub struct FormattedDiagnostic {
    /// The diagnostic type (Error, Warning, Hint).
    #[serde(rename = "type")]
    pub diagnostic_type: String,
    /// The file path.
    pub filename: String,
    /// The start position.
    pub start: Position,
    /// The end position.
    pub end: Position,
    /// The message.
    pub message: String,
    /// The diagnostic code.
    pub code: String,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
        Severity::Hint => "Hint",
    }
}

/// Formats diagnostics for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the diagnostics of one file. Spans must be file-relative.
    pub fn format(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path, source: &str) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(diagnostics, file_path, source, false),
            OutputFormat::HumanVerbose => self.format_human(diagnostics, file_path, source, true),
            OutputFormat::Json => {
                let formatted = Self::format_json_diagnostics(diagnostics, file_path, source);
                serde_json::to_string_pretty(&formatted).unwrap_or_default()
            }
            OutputFormat::Machine => self.format_machine(diagnostics, file_path, source),
        }
    }

    /// Formats as human-readable output, optionally with code snippets.
    fn format_human(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
        snippets: bool,
    ) -> String {
        let line_index = LineIndex::new(source);
        let lines: Vec<&str> = source.lines().collect();
        let mut output = String::new();

        for diag in diagnostics {
            let start = line_index.line_col(diag.span.start).unwrap_or_default();

            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n",
                file_path,
                start.line,
                start.column,
                severity_label(diag.severity),
                diag.message,
                diag.code
            ));

            if snippets {
                push_snippet(&mut output, &lines, start);
            }

            output.push('\n');
        }

        output
    }

    /// Formats diagnostics into JSON-ready structs.
    pub fn format_json_diagnostics(
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> Vec<FormattedDiagnostic> {
        let line_index = LineIndex::new(source);
        diagnostics
            .iter()
            .map(|diag| {
                let start = line_index.line_col(diag.span.start).unwrap_or_default();
                let end = line_index.line_col(diag.span.end).unwrap_or_default();

                FormattedDiagnostic {
                    diagnostic_type: severity_label(diag.severity).to_string(),
                    filename: file_path.to_string(),
                    start: Position {
                        line: start.line,
                        column: start.column,
                        offset: u32::from(diag.span.start),
                    },
                    end: Position {
                        line: end.line,
                        column: end.column,
                        offset: u32::from(diag.span.end),
                    },
                    message: diag.message.clone(),
                    code: diag.code.to_string(),
                }
            })
            .collect()
    }

    /// Formats as machine-readable output.
    fn format_machine(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for diag in diagnostics {
            let start = line_index.line_col(diag.span.start).unwrap_or_default();
            let end = line_index.line_col(diag.span.end).unwrap_or_default();

            output.push_str(&format!(
                "{} {}:{}:{}:{}:{} {} ({})\n",
                severity_label(diag.severity).to_uppercase(),
                file_path,
                start.line,
                start.column,
                end.line,
                end.column,
                diag.message,
                diag.code
            ));
        }

        output
    }

    /// Formats the notice for a file that `--check` found unconverted.
    pub fn format_pending(&self, file_path: &Utf8Path) -> String {
        match self.format {
            OutputFormat::Human | OutputFormat::HumanVerbose => {
                format!("{file_path}\nPending: Vue template syntax would be converted\n\n")
            }
            OutputFormat::Machine => format!("PENDING {file_path}\n"),
            OutputFormat::Json => String::new(),
        }
    }
}

fn push_snippet(output: &mut String, lines: &[&str], start: LineCol) {
    let Some(line) = (start.line as usize)
        .checked_sub(1)
        .and_then(|index| lines.get(index))
    else {
        return;
    };
    let gutter = start.line.to_string();
    output.push_str(&format!("  {gutter} | {line}\n"));
    output.push_str(&format!(
        "  {} | {}^\n",
        " ".repeat(gutter.len()),
        " ".repeat(start.column.saturating_sub(1) as usize)
    ));
}

/// Summary of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of files scanned.
    pub file_count: usize,
    /// Number of files containing Vue template syntax.
    pub converted_count: usize,
    /// Number of files written (in place or to the output directory).
    pub written_count: usize,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Whether to fail on warnings.
    pub fail_on_warnings: bool,
    /// Whether pending conversions fail the run.
    pub check: bool,
}

impl RunSummary {
    /// Returns true when the process should exit with an error.
    pub fn failed(&self) -> bool {
        self.error_count > 0
            || (self.fail_on_warnings && self.warning_count > 0)
            || (self.check && self.converted_count > 0)
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        let converted = if self.check {
            format!("{} to convert", self.converted_count)
        } else {
            format!("{} converted", self.converted_count)
        };
        let written = if self.written_count > 0 {
            format!(", {} written", self.written_count)
        } else {
            String::new()
        };

        format!(
            "====================================\nvuecast scanned {} ({}{}) and found {} and {}",
            plural(self.file_count, "file"),
            converted,
            written,
            plural(self.error_count, "error"),
            plural(self.warning_count, "warning"),
        )
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}
