//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Convert Vue template syntax in Astro components to Astro syntax.
#[derive(Debug, Parser)]
#[command(name = "vuecast")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Working directory to scan
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// Rewrite converted files in place
    #[arg(long, conflicts_with = "out_dir")]
    pub write: bool,

    /// Write converted files to this directory, mirroring the workspace layout
    #[arg(long = "out-dir")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Print converted files to stdout
    #[arg(long)]
    pub emit: bool,

    /// Exit with an error if any file would be converted
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Minimum severity threshold
    #[arg(long, value_enum, default_value = "warning")]
    pub threshold: Threshold,

    /// Exit with error on warnings
    #[arg(long = "fail-on-warnings")]
    pub fail_on_warnings: bool,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Skip conversion diagnostics
    #[arg(long = "no-diagnostics")]
    pub no_diagnostics: bool,

    /// Watch mode
    #[arg(long)]
    pub watch: bool,

    /// Preserve watch output (don't clear screen)
    #[arg(long = "preserve-watch-output", alias = "preserveWatchOutput")]
    pub preserve_watch_output: bool,

    /// Print timing breakdowns
    #[arg(long)]
    pub timings: bool,

    /// Timing output format
    #[arg(long, value_enum, default_value = "text")]
    pub timings_format: TimingFormat,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// Human-readable with code snippets
    HumanVerbose,
    /// JSON output
    Json,
    /// Machine-readable (one line per diagnostic)
    Machine,
}

/// Severity threshold.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Threshold {
    /// Only show errors
    Error,
    /// Show errors and warnings (default)
    #[default]
    Warning,
    /// Show everything, hints included
    Hint,
}

/// Timing output format.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum TimingFormat {
    /// Human-readable output
    #[default]
    Text,
    /// JSON output (machine-readable)
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["vuecast"]);
        assert_eq!(args.workspace.as_str(), ".");
        assert_eq!(args.output, OutputFormat::Human);
        assert_eq!(args.threshold, Threshold::Warning);
        assert!(!args.write);
        assert!(!args.watch);
    }

    #[test]
    fn test_custom_workspace() {
        let args = Args::parse_from(["vuecast", "--workspace", "/path/to/project"]);
        assert_eq!(args.workspace.as_str(), "/path/to/project");
    }

    #[test]
    fn test_output_formats() {
        let args = Args::parse_from(["vuecast", "--output", "json"]);
        assert_eq!(args.output, OutputFormat::Json);

        let args = Args::parse_from(["vuecast", "--output", "human-verbose"]);
        assert_eq!(args.output, OutputFormat::HumanVerbose);
    }

    #[test]
    fn test_write_conflicts_with_out_dir() {
        let result = Args::try_parse_from(["vuecast", "--write", "--out-dir", "dist-vue"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_repeated_ignores() {
        let args = Args::parse_from([
            "vuecast",
            "--ignore",
            "legacy/**",
            "--ignore",
            "**/*.test.astro",
            "--preserveWatchOutput",
        ]);
        assert_eq!(args.ignore, vec!["legacy/**", "**/*.test.astro"]);
        assert!(args.preserve_watch_output);
    }
}
