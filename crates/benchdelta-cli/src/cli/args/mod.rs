use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub mod compare;
pub use common::*;
pub use compare::*;

#[derive(Parser)]
#[command(
    name = "benchdelta",
    version,
    about = "Inspect benchmark run reports and compare them against a baseline run"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run metadata, aggregate status codes and rate limiting warning
    Overview(OverviewArgs),
    /// Flattened endpoint metrics of a run
    Metrics(MetricsArgs),
    /// Edge check results of a run
    EdgeChecks(EdgeChecksArgs),
    /// Compare a run against a baseline run
    Compare(CompareArgs),
    /// Write summary.md (and a delta file with --against) for a run
    Report(ReportArgs),
}

#[derive(Parser, Clone)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Clone)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, value_enum, default_value_t = TableFormat::Text)]
    pub format: TableFormat,
}

#[derive(Parser, Clone)]
pub struct EdgeChecksArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct InputArgs {
    /// Report to read (default: <bench-root>/latest/raw.json)
    #[arg(long, env = "BENCHDELTA_INPUT")]
    pub input: Option<PathBuf>,

    /// Config file (default: ./benchdelta.yaml when present)
    #[arg(long, env = "BENCHDELTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding benchmark runs
    #[arg(long, env = "BENCHDELTA_BENCH_ROOT")]
    pub bench_root: Option<PathBuf>,
}
