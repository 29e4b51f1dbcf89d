use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use benchdelta_core::report::markdown::{
    delta_file_name, render_delta_markdown, render_summary_markdown, SUMMARY_FILE,
};
use benchdelta_core::BenchmarkDelta;

use super::input;
use crate::cli::args::ReportArgs;
use crate::exit_codes;

/// `--output` names the summary file itself; by default it sits next to the input.
fn summary_path(explicit: Option<PathBuf>, input: &Path) -> PathBuf {
    explicit.unwrap_or_else(|| match input.parent() {
        Some(dir) => dir.join(SUMMARY_FILE),
        None => PathBuf::from(SUMMARY_FILE),
    })
}

async fn write_artifact(path: &Path, body: &str) -> Result<()> {
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

pub async fn run(args: ReportArgs) -> Result<i32> {
    let cfg = input::resolve_config(&args.input)?
        .with_threshold(args.threshold)
        .with_strict_keys(args.strict_keys);
    cfg.validate().context("invalid --threshold")?;
    let input_path = input::resolve_input(&args.input, &cfg)?;

    let (current, baseline) = match &args.against {
        Some(against) => {
            let (current, baseline) = tokio::try_join!(
                input::read_report(&input_path),
                input::read_report(against)
            )?;
            (current, Some(baseline))
        }
        None => (input::read_report(&input_path).await?, None),
    };

    let summary_file = summary_path(args.output, &input_path);
    let out_dir = summary_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    // an empty parent means the working directory
    if !out_dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(&out_dir)
            .await
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
    }

    let summary = render_summary_markdown(&current)?;
    write_artifact(&summary_file, &summary).await?;
    println!("{}", summary_file.display());

    if let Some(baseline) = baseline {
        let delta = BenchmarkDelta::compute(&current, &baseline, &cfg)?;
        let delta_file = out_dir.join(delta_file_name(&delta.against_run_id));
        write_artifact(&delta_file, &render_delta_markdown(&delta)).await?;
        println!("{}", delta_file.display());
    }
    Ok(exit_codes::SUCCESS)
}
