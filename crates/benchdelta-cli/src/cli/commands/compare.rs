use anyhow::{Context, Result};
use benchdelta_core::report::console::render_comparison;
use benchdelta_core::report::json::delta_to_json;
use benchdelta_core::report::markdown::render_delta_markdown;
use benchdelta_core::BenchmarkDelta;

use super::input;
use crate::cli::args::{CompareArgs, OutputFormat};
use crate::exit_codes;

pub async fn run(args: CompareArgs) -> Result<i32> {
    let cfg = input::resolve_config(&args.input)?
        .with_threshold(args.threshold)
        .with_strict_keys(args.strict_keys);
    cfg.validate().context("invalid --threshold")?;
    let current_path = input::resolve_input(&args.input, &cfg)?;

    let (current, baseline) = tokio::try_join!(
        input::read_report(&current_path),
        input::read_report(&args.baseline)
    )?;

    let delta = BenchmarkDelta::compute(&current, &baseline, &cfg)
        .with_context(|| format!("failed to compare against {}", args.baseline.display()))?;
    tracing::info!(
        against = %delta.against_run_id,
        improved = delta.summary.improved,
        regressed = delta.summary.regressed,
        neutral = delta.summary.neutral,
        "comparison complete"
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_comparison(&delta)),
        OutputFormat::Json => println!("{}", delta_to_json(&delta)?),
        OutputFormat::Markdown => print!("{}", render_delta_markdown(&delta)),
    }

    if args.fail_on_regression && delta.has_regressions() {
        tracing::warn!(regressed = delta.summary.regressed, "regressions detected");
        return Ok(exit_codes::REGRESSION);
    }
    Ok(exit_codes::SUCCESS)
}
