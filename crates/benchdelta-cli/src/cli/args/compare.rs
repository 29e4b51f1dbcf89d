//! Baseline comparison arguments.

use std::path::PathBuf;

use clap::Parser;

use super::{InputArgs, OutputFormat};

#[derive(Parser, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Baseline report to compare against
    #[arg(long, env = "BENCHDELTA_BASELINE")]
    pub baseline: PathBuf,

    /// Neutral threshold in percent (overrides config)
    #[arg(long, env = "BENCHDELTA_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fail when an endpoint key appears twice in one report
    #[arg(long)]
    pub strict_keys: bool,

    /// Exit with code 1 when any endpoint regressed
    #[arg(long)]
    pub fail_on_regression: bool,
}

#[derive(Parser, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Summary markdown file (default: summary.md next to the input report)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Baseline report; also writes delta-vs-<runId>.md next to the summary
    #[arg(long)]
    pub against: Option<PathBuf>,

    /// Neutral threshold in percent (overrides config)
    #[arg(long, env = "BENCHDELTA_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Fail when an endpoint key appears twice in one report
    #[arg(long)]
    pub strict_keys: bool,
}
