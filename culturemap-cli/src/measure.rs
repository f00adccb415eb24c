//! `distance` and `estimate` commands.

use std::io::Write;

use clap::Parser;
use culturemap_core::{
    EstimationPolicy, GeoPoint, TravelEstimate, TravelEstimator, distance_meters, format_distance,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_FROM, ARG_POLICY, ARG_TO, CliError, ENV_DISTANCE_FROM, ENV_DISTANCE_TO, parse_point,
    parse_policy,
};

/// CLI arguments for the `distance` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print the great-circle distance between two points")]
#[ortho_config(prefix = "CULTUREMAP")]
pub(crate) struct DistanceArgs {
    /// Departure point as `LAT,LON`.
    #[arg(long = ARG_FROM, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// Arrival point as `LAT,LON`.
    #[arg(long = ARG_TO, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) to: Option<String>,
}

/// Resolved `distance` configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DistanceConfig {
    pub(crate) from: GeoPoint,
    pub(crate) to: GeoPoint,
}

impl TryFrom<DistanceArgs> for DistanceConfig {
    type Error = CliError;

    fn try_from(args: DistanceArgs) -> Result<Self, Self::Error> {
        let from = parse_point(args.from.as_deref(), ARG_FROM)?.ok_or(
            CliError::MissingArgument {
                field: ARG_FROM,
                env: ENV_DISTANCE_FROM,
            },
        )?;
        let to = parse_point(args.to.as_deref(), ARG_TO)?.ok_or(CliError::MissingArgument {
            field: ARG_TO,
            env: ENV_DISTANCE_TO,
        })?;
        Ok(Self { from, to })
    }
}

pub(crate) fn run_distance(args: DistanceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_distance_with(args, &mut stdout)
}

pub(crate) fn run_distance_with(args: DistanceArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = DistanceConfig::try_from(merged)?;
    let meters = distance_meters(&config.from, &config.to);
    writeln!(writer, "{meters:.1} m ({})", format_distance(meters)).map_err(CliError::WriteOutput)
}

/// CLI arguments for the `estimate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Estimate travel between two points. Up to 1.5 km is walked, \
                 anything further is driven. When either point is omitted \
                 the output is `null`.",
    about = "Estimate walking or driving time between two points"
)]
#[ortho_config(prefix = "CULTUREMAP")]
pub(crate) struct EstimateArgs {
    /// Departure point as `LAT,LON`.
    #[arg(long = ARG_FROM, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// Arrival point as `LAT,LON`.
    #[arg(long = ARG_TO, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// `walk-or-drive` (default) or `drive-only`.
    #[arg(long = ARG_POLICY, value_name = "policy")]
    #[serde(default)]
    pub(crate) policy: Option<String>,
}

/// Resolved `estimate` configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EstimateConfig {
    pub(crate) from: Option<GeoPoint>,
    pub(crate) to: Option<GeoPoint>,
    pub(crate) policy: EstimationPolicy,
}

impl TryFrom<EstimateArgs> for EstimateConfig {
    type Error = CliError;

    fn try_from(args: EstimateArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            from: parse_point(args.from.as_deref(), ARG_FROM)?,
            to: parse_point(args.to.as_deref(), ARG_TO)?,
            policy: parse_policy(args.policy.as_deref())?,
        })
    }
}

/// JSON output of `estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EstimateReport {
    #[serde(flatten)]
    pub(crate) estimate: TravelEstimate,
    pub(crate) distance_text: String,
    pub(crate) duration_text: String,
    pub(crate) icon: String,
}

impl From<TravelEstimate> for EstimateReport {
    fn from(estimate: TravelEstimate) -> Self {
        Self {
            distance_text: estimate.distance_text(),
            duration_text: estimate.duration_text(),
            icon: estimate.transport_mode.icon().to_owned(),
            estimate,
        }
    }
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_estimate_with(args, &mut stdout)
}

pub(crate) fn run_estimate_with(args: EstimateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = EstimateConfig::try_from(merged)?;
    let report = TravelEstimator::new(config.policy)
        .estimate(config.from.as_ref(), config.to.as_ref())
        .map(EstimateReport::from);
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseOutput)?;
    writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn estimate_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<EstimateConfig, CliError> {
    let merged = EstimateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    EstimateConfig::try_from(merged)
}
