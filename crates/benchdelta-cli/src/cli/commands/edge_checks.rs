use anyhow::Result;
use benchdelta_core::report::console::render_edge_checks;

use super::input;
use crate::cli::args::EdgeChecksArgs;
use crate::exit_codes;

pub async fn run(args: EdgeChecksArgs) -> Result<i32> {
    let (_, _, report) = input::load(&args.input).await?;
    print!("{}", render_edge_checks(&report.edge_checks()?));
    Ok(exit_codes::SUCCESS)
}
