use anyhow::Result;
use benchdelta_core::report::console::render_metrics;
use benchdelta_core::report::json::metrics_to_json;

use super::input;
use crate::cli::args::{MetricsArgs, TableFormat};
use crate::exit_codes;

pub async fn run(args: MetricsArgs) -> Result<i32> {
    let (_, _, report) = input::load(&args.input).await?;
    let records = report.metrics()?;
    match args.format {
        TableFormat::Text => print!("{}", render_metrics(&records)),
        TableFormat::Json => println!("{}", metrics_to_json(&records)?),
    }
    Ok(exit_codes::SUCCESS)
}
