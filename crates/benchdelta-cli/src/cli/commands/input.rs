//! Config and report resolution shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use benchdelta_core::errors::LoadError;
use benchdelta_core::source::{latest_report_path, parse_report};
use benchdelta_core::{CompareConfig, Report};

use crate::cli::args::InputArgs;

/// Load the config file (explicit or discovered in the working directory)
/// and apply `--bench-root`.
pub(crate) fn resolve_config(args: &InputArgs) -> Result<CompareConfig> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let cfg = CompareConfig::discover(args.config.as_deref(), &cwd)
        .context("failed to load config")?
        .with_bench_root(args.bench_root.clone());
    Ok(cfg)
}

pub(crate) fn resolve_input(args: &InputArgs, cfg: &CompareConfig) -> Result<PathBuf> {
    match &args.input {
        Some(path) => Ok(path.clone()),
        None => latest_report_path(&cfg.bench_root)
            .context("no --input given and no latest report under the bench root"),
    }
}

pub(crate) async fn read_report(path: &Path) -> Result<Report> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::from_io(path, e))?;
    let report = parse_report(&text, path)?;
    Ok(report)
}

/// Resolve config and input, then read the report.
pub(crate) async fn load(args: &InputArgs) -> Result<(CompareConfig, PathBuf, Report)> {
    let cfg = resolve_config(args)?;
    let path = resolve_input(args, &cfg)?;
    let report = read_report(&path).await?;
    Ok((cfg, path, report))
}
