//! Command-line interface for planning fuel stops from files on disk.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

const ARG_CATALOG: &str = "catalog";
const ARG_ROUTE: &str = "route";
const ARG_RANGE_MILES: &str = "range-miles";
const ARG_MPG: &str = "mpg";
const ARG_TANK_CAPACITY: &str = "tank-capacity";
const ARG_SEARCH_RADIUS: &str = "search-radius";
const ARG_NO_THINNING: &str = "no-thinning";
const ENV_CATALOG: &str = "FUELSTOP_CMDS_PLAN_CATALOG";
const ENV_ROUTE: &str = "FUELSTOP_CMDS_PLAN_ROUTE";

/// Run the fuelstop CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fuelstop",
    about = "Plan the cheapest fuel stops along a driving route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan fuel stops for a route using a station catalog.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
