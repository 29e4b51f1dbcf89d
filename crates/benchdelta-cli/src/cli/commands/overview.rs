use anyhow::Result;
use benchdelta_core::report::console::render_overview;
use benchdelta_core::Overview;

use super::input;
use crate::cli::args::OverviewArgs;
use crate::exit_codes;

pub async fn run(args: OverviewArgs) -> Result<i32> {
    let (_, _, report) = input::load(&args.input).await?;
    let overview = Overview::from_report(&report)?;
    print!("{}", render_overview(&overview));
    Ok(exit_codes::SUCCESS)
}
