//! Main orchestration logic.

use crate::cli::{Args, OutputFormat, Threshold, TimingFormat};
use crate::config::VuecastConfig;
use crate::output::{FormattedDiagnostic, Formatter, RunSummary};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;
use vue_astro_diagnostics::{check, parse_diagnostics, Diagnostic, DiagnosticOptions, Severity};
use vue_astro_transformer::{split_frontmatter, Pipeline};
use vue_template_parser::parse;
use walkdir::WalkDir;

/// Patterns that are never scanned.
const DEFAULT_IGNORES: &[&str] = &["**/node_modules/**", "**/dist/**", "**/.astro/**"];

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Failed to read a file.
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a converted file.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    /// The workspace path is not usable.
    #[error("invalid workspace: {0}")]
    InvalidWorkspace(String),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// Watch error.
    #[error("watch error: {0}")]
    WatchFailed(String),
}

/// Everything a pass over the workspace needs.
struct Context {
    args: Args,
    workspace: Utf8PathBuf,
    out_dir: Option<Utf8PathBuf>,
    extensions: Vec<String>,
    ignore_set: GlobSet,
    diagnostics: bool,
    timings: bool,
    pipeline: Pipeline,
    /// Content of each file as last rewritten in place by this process.
    written: Mutex<HashMap<Utf8PathBuf, String>>,
}

/// The result of processing one file.
struct FileOutcome {
    path: Utf8PathBuf,
    converted: bool,
    written: bool,
    emitted: Option<String>,
    report: Option<String>,
    json: Vec<FormattedDiagnostic>,
    error_count: usize,
    warning_count: usize,
}

/// Runs a conversion pass, or keeps running them in watch mode.
pub fn run(args: Args) -> Result<RunSummary, OrchestratorError> {
    let context = Context::new(args)?;
    if context.args.watch {
        run_watch_mode(&context)
    } else {
        run_once(&context)
    }
}

impl Context {
    fn new(args: Args) -> Result<Self, OrchestratorError> {
        let workspace = absolute(&args.workspace)?;
        let out_dir = args.out_dir.as_deref().map(absolute).transpose()?;
        let config = VuecastConfig::load(&workspace);

        let mut ignore_builder = GlobSetBuilder::new();
        for pattern in config.ignore.iter().chain(&args.ignore) {
            let glob =
                Glob::new(pattern).map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;
            ignore_builder.add(glob);
        }
        for pattern in DEFAULT_IGNORES {
            if let Ok(glob) = Glob::new(pattern) {
                ignore_builder.add(glob);
            }
        }
        let ignore_set = ignore_builder
            .build()
            .map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;

        let timings = args.timings
            || args.timings_format == TimingFormat::Json
            || read_env_bool("VUECAST_TIMINGS").unwrap_or(false);

        Ok(Self {
            extensions: config
                .file_extensions()
                .into_iter()
                .map(str::to_string)
                .collect(),
            diagnostics: config.diagnostics_enabled() && !args.no_diagnostics,
            ignore_set,
            timings,
            workspace,
            out_dir,
            pipeline: Pipeline::with_vue_templates(),
            written: Mutex::new(HashMap::new()),
            args,
        })
    }

    fn relative<'a>(&self, path: &'a Utf8Path) -> &'a Utf8Path {
        path.strip_prefix(&self.workspace).unwrap_or(path)
    }

    fn has_extension(&self, path: &Utf8Path) -> bool {
        let file_name = path.file_name().unwrap_or("");
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    fn is_ignored(&self, path: &Utf8Path) -> bool {
        if let Some(out_dir) = &self.out_dir {
            if path.starts_with(out_dir) {
                return true;
            }
        }
        self.ignore_set.is_match(self.relative(path).as_str())
    }

    /// Finds the files to convert, sorted for stable output.
    fn discover_files(&self) -> Vec<Utf8PathBuf> {
        let mut files: Vec<Utf8PathBuf> = WalkDir::new(&self.workspace)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
            .filter(|p| self.has_extension(p) && !self.is_ignored(p))
            .collect();
        files.sort();
        files
    }

    /// Returns true if `source` is exactly what an earlier pass wrote to `path`.
    ///
    /// Converted output can still look like Vue syntax (`class={{ a: b }}`
    /// matches the mustache pattern), so it must not be converted again.
    fn wrote(&self, path: &Utf8Path, source: &str) -> bool {
        self.written
            .lock()
            .map(|written| written.get(path).is_some_and(|code| code == source))
            .unwrap_or(false)
    }

    fn record_write(&self, path: &Utf8Path, code: &str) {
        if let Ok(mut written) = self.written.lock() {
            written.insert(path.to_owned(), code.to_owned());
        }
    }

    fn keep(&self, severity: Severity) -> bool {
        match self.args.threshold {
            Threshold::Error => severity == Severity::Error,
            Threshold::Warning => severity >= Severity::Warning,
            Threshold::Hint => true,
        }
    }
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, OrchestratorError> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| OrchestratorError::InvalidWorkspace(e.to_string()))?;
    let cwd = Utf8PathBuf::try_from(cwd)
        .map_err(|e| OrchestratorError::InvalidWorkspace(e.to_string()))?;
    Ok(cwd.join(path))
}

/// Converts one file and collects its diagnostics.
fn process_file(context: &Context, path: &Utf8Path) -> Result<FileOutcome, OrchestratorError> {
    let source = fs::read_to_string(path).map_err(|source| OrchestratorError::ReadFailed {
        path: path.to_owned(),
        source,
    })?;
    let relative = context.relative(path);
    let args = &context.args;

    let converted = if context.wrote(path, &source) {
        log::debug!("skipping {relative}, unchanged since it was written");
        None
    } else {
        context.pipeline.run(&source, path.as_str())
    };
    let mut outcome = FileOutcome {
        path: path.to_owned(),
        converted: converted.is_some(),
        written: false,
        emitted: None,
        report: None,
        json: Vec::new(),
        error_count: 0,
        warning_count: 0,
    };
    let Some(code) = converted else {
        return Ok(outcome);
    };
    log::debug!("converted {relative}");

    if context.diagnostics {
        let diagnostics: Vec<Diagnostic> = file_diagnostics(&source)
            .into_iter()
            .filter(|d| context.keep(d.severity))
            .collect();
        for diag in &diagnostics {
            match diag.severity {
                Severity::Error => outcome.error_count += 1,
                Severity::Warning => outcome.warning_count += 1,
                Severity::Hint => {}
            }
        }
        if !diagnostics.is_empty() {
            if args.output == OutputFormat::Json {
                outcome.json = Formatter::format_json_diagnostics(&diagnostics, relative, &source);
            } else {
                let formatter = Formatter::new(args.output);
                outcome.report = Some(formatter.format(&diagnostics, relative, &source));
            }
        }
    }

    if args.check {
        let pending = Formatter::new(args.output).format_pending(relative);
        outcome.report = Some(outcome.report.unwrap_or_default() + &pending);
    }

    if args.write {
        write_file(path, &code)?;
        context.record_write(path, &code);
        outcome.written = true;
    } else if let Some(out_dir) = &context.out_dir {
        let target = out_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| OrchestratorError::WriteFailed {
                path: parent.to_owned(),
                source,
            })?;
        }
        write_file(&target, &code)?;
        outcome.written = true;
    }

    if args.emit {
        outcome.emitted = Some(code);
    }

    Ok(outcome)
}

fn write_file(path: &Utf8Path, code: &str) -> Result<(), OrchestratorError> {
    fs::write(path, code).map_err(|source| OrchestratorError::WriteFailed {
        path: path.to_owned(),
        source,
    })
}

/// Parse errors and conversion diagnostics with file-relative spans.
fn file_diagnostics(source: &str) -> Vec<Diagnostic> {
    let Some(split) = split_frontmatter(source) else {
        return Vec::new();
    };
    let result = parse(split.body);
    let mut diagnostics = parse_diagnostics(&result.errors);
    diagnostics.extend(check(&result.document, DiagnosticOptions::all()));
    diagnostics.sort_by_key(|d| d.span.start);
    diagnostics
        .into_iter()
        .map(|d| d.shifted(split.body_offset))
        .collect()
}

/// Runs a single conversion pass.
fn run_once(context: &Context) -> Result<RunSummary, OrchestratorError> {
    let args = &context.args;
    let total_start = Instant::now();

    let scan_start = Instant::now();
    let files = context.discover_files();
    let scan_time = scan_start.elapsed();

    let convert_start = Instant::now();
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| process_file(context, path))
        .collect::<Result<_, _>>()?;
    let convert_time = convert_start.elapsed();

    let mut summary = RunSummary {
        file_count: files.len(),
        fail_on_warnings: args.fail_on_warnings,
        check: args.check,
        ..Default::default()
    };
    let mut json_output = Vec::new();

    for outcome in outcomes {
        summary.converted_count += usize::from(outcome.converted);
        summary.written_count += usize::from(outcome.written);
        summary.error_count += outcome.error_count;
        summary.warning_count += outcome.warning_count;

        if let Some(code) = outcome.emitted {
            println!("=== {} ===\n{}", context.relative(&outcome.path), code);
        }
        if let Some(report) = outcome.report {
            print!("{report}");
        }
        json_output.extend(outcome.json);
    }

    if context.timings {
        report_timings(
            args.timings_format,
            &Timings {
                scan: scan_time,
                convert: convert_time,
                total: total_start.elapsed(),
                file_count: files.len(),
                converted_count: summary.converted_count,
            },
        );
    }

    if args.output == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&json_output).unwrap_or_else(|_| "[]".to_string());
        println!("{json}");
    } else {
        println!("{}", summary.format());
    }

    Ok(summary)
}

struct Timings {
    scan: Duration,
    convert: Duration,
    total: Duration,
    file_count: usize,
    converted_count: usize,
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn report_timings(format: TimingFormat, timings: &Timings) {
    match format {
        TimingFormat::Json => {
            let json = serde_json::json!({
                "file_scan_ms": duration_ms(timings.scan),
                "convert_ms": duration_ms(timings.convert),
                "file_count": timings.file_count,
                "converted_count": timings.converted_count,
                "total_ms": duration_ms(timings.total),
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
            );
        }
        TimingFormat::Text => {
            eprintln!("=== vuecast timings ===");
            eprintln!("file scan: {:?} ({} files)", timings.scan, timings.file_count);
            eprintln!(
                "convert: {:?} ({} converted)",
                timings.convert, timings.converted_count
            );
            eprintln!("total: {:?}", timings.total);
        }
    }
}

fn read_env_bool(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Runs in watch mode.
///
/// Files rewritten by `--write` trigger one more pass, which skips them as
/// long as their content is still what was written.
fn run_watch_mode(context: &Context) -> Result<RunSummary, OrchestratorError> {
    use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc;

    println!("Starting watch mode...\n");

    run_once(context)?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )
    .map_err(|e| OrchestratorError::WatchFailed(e.to_string()))?;

    watcher
        .watch(context.workspace.as_std_path(), RecursiveMode::Recursive)
        .map_err(|e| OrchestratorError::WatchFailed(e.to_string()))?;

    println!("Watching for changes... (Ctrl+C to stop)\n");

    let is_relevant = |event: &notify::Event| {
        event.paths.iter().any(|path| {
            Utf8Path::from_path(path)
                .is_some_and(|p| context.has_extension(p) && !context.is_ignored(p))
        })
    };

    while let Ok(event) = rx.recv() {
        if !is_relevant(&event) {
            continue;
        }
        // Editors often emit several events per save.
        while rx.recv_timeout(Duration::from_millis(50)).is_ok() {}

        if !context.args.preserve_watch_output {
            print!("\x1B[2J\x1B[1;1H");
        }
        println!("File changed, converting...\n");

        if let Err(e) = run_once(context) {
            log::error!("{e}");
        }
    }

    Err(OrchestratorError::WatchFailed(
        "watch channel closed unexpectedly".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn context_for(root: &Utf8Path, extra: &[&str]) -> Context {
        let mut argv = vec!["vuecast", "--workspace", root.as_str()];
        argv.extend_from_slice(extra);
        Context::new(Args::parse_from(argv)).unwrap()
    }

    #[test]
    fn test_file_diagnostics_are_file_relative() {
        let source = "---\nconst a = 1;\n---\n<p v-else>{{ a }}</p>";
        let diagnostics = file_diagnostics(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span.slice(source), "v-else");
    }

    #[test]
    fn test_discover_respects_ignores() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        for file in [
            "src/pages/index.astro",
            "src/legacy/old.astro",
            "node_modules/pkg/x.astro",
            "src/readme.md",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "---\n---\n").unwrap();
        }

        let context = context_for(root, &["--ignore", "src/legacy/**"]);
        let files: Vec<_> = context
            .discover_files()
            .iter()
            .map(|p| context.relative(p).to_string())
            .collect();
        assert_eq!(files, vec!["src/pages/index.astro"]);
    }

    #[test]
    fn test_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();

        let context = context_for(root, &[]);
        assert!(!context.keep(Severity::Hint));
        assert!(context.keep(Severity::Warning));

        let context = context_for(root, &["--threshold", "error"]);
        assert!(!context.keep(Severity::Warning));

        let context = context_for(root, &["--threshold", "hint"]);
        assert!(context.keep(Severity::Hint));
    }

    #[test]
    fn test_second_pass_skips_written_object_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let path = root.join("index.astro");
        fs::write(
            &path,
            "---\n---\n<div :class=\"{ active: on }\" :style=\"{ color: c }\">x</div>\n",
        )
        .unwrap();

        let context = context_for(root, &["--write"]);
        let first = run_once(&context).unwrap();
        assert_eq!(first.written_count, 1);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "---\n---\n<div class={{ active: on }} style={{ color: c }}>x</div>\n"
        );

        let second = run_once(&context).unwrap();
        assert_eq!(second.converted_count, 0);
        assert_eq!(second.written_count, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn test_edited_file_is_converted_again() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let path = root.join("index.astro");
        fs::write(&path, "---\n---\n<p>{{ a }}</p>\n").unwrap();

        let context = context_for(root, &["--write"]);
        run_once(&context).unwrap();
        fs::write(&path, "---\n---\n<p>done</p>\n<b>{{ b }}</b>\n").unwrap();

        let second = run_once(&context).unwrap();
        assert_eq!(second.written_count, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "---\n---\n<p>done</p><b>{b}</b>\n"
        );
    }

    #[test]
    fn test_read_env_bool() {
        std::env::set_var("VUECAST_TEST_BOOL", "Yes");
        assert_eq!(read_env_bool("VUECAST_TEST_BOOL"), Some(true));
        assert_eq!(read_env_bool("VUECAST_TEST_UNSET_BOOL"), None);
    }
}
