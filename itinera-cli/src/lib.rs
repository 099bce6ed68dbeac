//! Command-line interface for the Itinera trip planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::PlanArgs;

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ENV_PLAN_REQUEST: &str = "ITINERA_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ARG_PLAN_AIRPORTS: &str = "airports";
pub(crate) const ARG_PLAN_AIRPORT_SERVICE: &str = "airport-service";
pub(crate) const ARG_PLAN_MAX_AIRPORT_KM: &str = "max-airport-km";
pub(crate) const ARG_PLAN_SEED: &str = "seed";
pub(crate) const ARG_PLAN_CANDIDATES: &str = "candidates";

/// Run the Itinera CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or planning
/// fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "itinera",
    about = "Plan fair multi-traveler trip itineraries",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan an itinerary from a JSON trip request.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
