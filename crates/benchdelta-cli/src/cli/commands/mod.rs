use super::args::{Cli, Command};

pub mod compare;
pub mod edge_checks;
pub(crate) mod input;
pub mod metrics;
pub mod overview;
pub mod report;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Overview(args) => overview::run(args).await,
        Command::Metrics(args) => metrics::run(args).await,
        Command::EdgeChecks(args) => edge_checks::run(args).await,
        Command::Compare(args) => compare::run(args).await,
        Command::Report(args) => report::run(args).await,
    }
}
