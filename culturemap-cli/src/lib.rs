//! Command-line interface for the Culturemap travel estimator.
//!
//! Three subcommands are offered:
//! - `distance` prints the great-circle distance between two points.
//! - `estimate` prints the walk-or-drive estimate between two points.
//! - `itinerary` plans routes for a JSON itinerary, using the directions API
//!   when a key is configured and straight-line estimates otherwise.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use culturemap_core::{EstimationPolicy, GeoPoint};

mod error;
mod itinerary;
mod measure;

pub use error::CliError;

use itinerary::{ItineraryArgs, run_itinerary};
use measure::{DistanceArgs, EstimateArgs, run_distance, run_estimate};

pub(crate) const ARG_FROM: &str = "from";
pub(crate) const ARG_TO: &str = "to";
pub(crate) const ARG_POLICY: &str = "policy";
pub(crate) const ARG_ITINERARY: &str = "itinerary";
pub(crate) const ARG_KAKAO_API_KEY: &str = "kakao-api-key";
pub(crate) const ARG_DIRECTIONS_BASE_URL: &str = "directions-base-url";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_DISTANCE_FROM: &str = "CULTUREMAP_CMDS_DISTANCE_FROM";
pub(crate) const ENV_DISTANCE_TO: &str = "CULTUREMAP_CMDS_DISTANCE_TO";
pub(crate) const ENV_ITINERARY_PATH: &str = "CULTUREMAP_CMDS_ITINERARY_ITINERARY_PATH";

/// Run the Culturemap CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Distance(args) => run_distance(args),
        Command::Estimate(args) => run_estimate(args),
        Command::Itinerary(args) => run_itinerary(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "culturemap",
    about = "Distance and travel-time tools for culture itineraries",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the great-circle distance between two points.
    Distance(DistanceArgs),
    /// Estimate walking or driving time between two points.
    Estimate(EstimateArgs),
    /// Plan routes between the stops of an itinerary file.
    Itinerary(ItineraryArgs),
}

/// Parse an optional `LAT,LON` option.
fn parse_point(value: Option<&str>, field: &'static str) -> Result<Option<GeoPoint>, CliError> {
    value
        .map(|raw| {
            raw.parse::<GeoPoint>()
                .map_err(|source| CliError::InvalidPoint {
                    field,
                    value: raw.to_owned(),
                    source,
                })
        })
        .transpose()
}

/// Parse an optional policy name, defaulting to walk-or-drive.
fn parse_policy(value: Option<&str>) -> Result<EstimationPolicy, CliError> {
    value.map_or(Ok(EstimationPolicy::default()), |raw| {
        raw.parse()
            .map_err(|message| CliError::InvalidPolicy {
                value: raw.to_owned(),
                message,
            })
    })
}

#[cfg(test)]
mod tests;
