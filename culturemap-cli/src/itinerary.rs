//! `itinerary` command: plan routes for a JSON itinerary.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use culturemap_core::{
    Directions, DirectionsProvider, EstimationPolicy, Itinerary, LegDisplay, LegSource, RoutePlan,
    RoutePlanner, Stop, SummaryError, TravelEstimator, segment_key,
};
use culturemap_data::{
    DisabledDirectionsProvider, HttpDirectionsProvider, HttpDirectionsProviderConfig,
};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DIRECTIONS_BASE_URL, ARG_ITINERARY, ARG_KAKAO_API_KEY, ARG_OUTPUT, ARG_POLICY, CliError,
    ENV_ITINERARY_PATH, parse_policy,
};

/// CLI arguments for the `itinerary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan routes between consecutive stops of an itinerary \
                 JSON file. With a Kakao REST API key, legs are routed by \
                 the Kakao Mobility directions API; legs it cannot answer \
                 and every leg without a key fall back to straight-line \
                 estimates.",
    about = "Plan routes between the stops of an itinerary file"
)]
#[ortho_config(prefix = "CULTUREMAP")]
pub(crate) struct ItineraryArgs {
    /// Path to a JSON file containing an itinerary.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) itinerary_path: Option<Utf8PathBuf>,
    /// Kakao REST API key; without one, routed directions are disabled.
    #[arg(long = ARG_KAKAO_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) kakao_api_key: Option<String>,
    /// Override the directions endpoint.
    #[arg(long = ARG_DIRECTIONS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
    /// Fallback estimate policy: `walk-or-drive` (default) or `drive-only`.
    #[arg(long = ARG_POLICY, value_name = "policy")]
    #[serde(default)]
    pub(crate) policy: Option<String>,
    /// Write the report here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ItineraryArgs {
    pub(crate) fn into_config(self) -> Result<ItineraryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ItineraryConfig::try_from(merged)
    }
}

/// Resolved `itinerary` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct ItineraryConfig {
    pub(crate) itinerary_path: Utf8PathBuf,
    pub(crate) directions: HttpDirectionsProviderConfig,
    pub(crate) policy: EstimationPolicy,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ItineraryConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.itinerary_path;
        match culturemap_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
                field: ARG_ITINERARY,
                path: path.clone(),
            }),
            Ok(false) => Err(CliError::MissingSourceFile {
                field: ARG_ITINERARY,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_ITINERARY,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_ITINERARY,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<ItineraryArgs> for ItineraryConfig {
    type Error = CliError;

    fn try_from(args: ItineraryArgs) -> Result<Self, Self::Error> {
        let itinerary_path = args.itinerary_path.ok_or(CliError::MissingArgument {
            field: ARG_ITINERARY,
            env: ENV_ITINERARY_PATH,
        })?;

        let mut directions =
            HttpDirectionsProviderConfig::new(args.kakao_api_key.unwrap_or_default());
        if let Some(base_url) = args.directions_base_url {
            directions = directions.with_base_url(base_url);
        }

        Ok(Self {
            itinerary_path,
            directions,
            policy: parse_policy(args.policy.as_deref())?,
            output: args.output,
        })
    }
}

/// Builds the directions provider for the current invocation.
pub(crate) trait DirectionsProviderBuilder {
    fn build(&self, config: &ItineraryConfig) -> Result<Box<dyn DirectionsProvider>, CliError>;
}

pub(crate) struct DefaultDirectionsProviderBuilder;

impl DirectionsProviderBuilder for DefaultDirectionsProviderBuilder {
    fn build(&self, config: &ItineraryConfig) -> Result<Box<dyn DirectionsProvider>, CliError> {
        if !config.directions.has_api_key() {
            return Ok(Box::new(DisabledDirectionsProvider::new()));
        }
        let provider =
            HttpDirectionsProvider::with_config(config.directions.clone()).map_err(|source| {
                CliError::BuildDirectionsProvider {
                    base_url: config.directions.base_url.clone(),
                    source,
                }
            })?;
        Ok(Box::new(provider))
    }
}

/// One leg of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegReport {
    /// `"{from}-{to}"`.
    pub(crate) key: String,
    pub(crate) from: u64,
    pub(crate) to: u64,
    /// Display strings; absent when a stop lacks coordinates.
    pub(crate) display: Option<LegDisplay>,
    pub(crate) source: LegSource,
}

/// JSON output of `itinerary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItineraryReport {
    pub(crate) title: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) policy: EstimationPolicy,
    pub(crate) stops: Vec<Stop>,
    pub(crate) summary: Option<Directions>,
    pub(crate) summary_error: Option<SummaryError>,
    pub(crate) legs: Vec<LegReport>,
}

impl ItineraryReport {
    fn new(itinerary: Itinerary, policy: EstimationPolicy, plan: RoutePlan) -> Self {
        let legs = plan
            .legs
            .into_iter()
            .map(|leg| LegReport {
                key: segment_key(leg.from, leg.to),
                from: leg.from,
                to: leg.to,
                display: leg.display(),
                source: leg.source,
            })
            .collect();
        Self {
            title: itinerary.title,
            date: itinerary.date,
            policy,
            stops: itinerary.stops,
            summary: plan.summary,
            summary_error: plan.summary_error,
            legs,
        }
    }
}

pub(crate) fn run_itinerary(args: ItineraryArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultDirectionsProviderBuilder;
    run_itinerary_with(args, &builder, &mut stdout)
}

pub(crate) fn run_itinerary_with(
    args: ItineraryArgs,
    builder: &dyn DirectionsProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let itinerary = load_itinerary(&config.itinerary_path)?;

    let provider = builder.build(&config)?;
    let planner = RoutePlanner::new(provider, TravelEstimator::new(config.policy));
    let plan = planner.plan(&itinerary);
    info!(
        "planned {} legs for {}, {} routed",
        plan.legs.len(),
        config.itinerary_path,
        plan.routed_legs()
    );

    let report = ItineraryReport::new(itinerary, config.policy, plan);
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseOutput)?;
    match &config.output {
        Some(path) => culturemap_fs::write_string(path, &format!("{payload}\n")).map_err(
            |source| CliError::WriteOutputFile {
                path: path.clone(),
                source,
            },
        ),
        None => writeln!(writer, "{payload}").map_err(CliError::WriteOutput),
    }
}

/// Loads a JSON-encoded [`Itinerary`] from disk, ordering its stops.
pub(crate) fn load_itinerary(path: &Utf8Path) -> Result<Itinerary, CliError> {
    let contents =
        culturemap_fs::read_to_string(path).map_err(|source| CliError::ReadItinerary {
            path: path.to_path_buf(),
            source,
        })?;
    let mut itinerary: Itinerary =
        serde_json::from_str(&contents).map_err(|source| CliError::ParseItinerary {
            path: path.to_path_buf(),
            source,
        })?;
    itinerary.sort_stops();
    Ok(itinerary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ItineraryConfig, CliError> {
    let merged = ItineraryArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ItineraryConfig::try_from(merged)
}
