//! Entry point for the `itinera` binary.
#![forbid(unsafe_code)]

use itinera_cli::CliError;

fn main() -> eyre::Result<()> {
    match itinera_cli::run() {
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => outcome.map_err(eyre::Report::from),
    }
}
