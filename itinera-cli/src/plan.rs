//! `plan` command implementation for the Itinera CLI.

use std::io::{BufReader, Write};
use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use itinera_core::{
    AirportLookup, AirportLookupError, GeoPoint, Place, Plan, TripOptimizer, TripRequest,
};
use itinera_data::{AirportCatalog, HttpAirportLookup};
use itinera_planner::{ItineraryPlanner, PlannerConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_AIRPORT_SERVICE, ARG_PLAN_AIRPORTS, ARG_PLAN_CANDIDATES, ARG_PLAN_MAX_AIRPORT_KM,
    ARG_PLAN_REQUEST, ARG_PLAN_SEED, CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan an itinerary for a JSON-encoded TripRequest. Flying \
                 legs resolve airports from a local JSON catalogue or from a \
                 nearest-airport HTTP service; without either, every leg \
                 travels over land. The plan is written to stdout as JSON.",
    about = "Plan a multi-traveler trip"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a TripRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// JSON array of airports used for nearest-airport lookups.
    #[arg(long = ARG_PLAN_AIRPORTS, value_name = "path")]
    #[serde(default)]
    pub(crate) airports: Option<Utf8PathBuf>,
    /// Base URL of a nearest-airport service (e.g. "http://localhost:8080").
    #[arg(long = ARG_PLAN_AIRPORT_SERVICE, value_name = "url")]
    #[serde(default)]
    pub(crate) airport_service: Option<String>,
    /// Ignore catalogue airports further than this from a stop. Requires
    /// `--airports`.
    #[arg(long = ARG_PLAN_MAX_AIRPORT_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) max_airport_km: Option<f64>,
    /// Base seed for the selector shuffle.
    #[arg(long = ARG_PLAN_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Number of candidate itineraries to build and rank.
    #[arg(long = ARG_PLAN_CANDIDATES, value_name = "n")]
    #[serde(default)]
    pub(crate) candidates: Option<NonZeroUsize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Where flying legs look up airports.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AirportSource {
    /// No lookup; flying legs fall back to land.
    Disabled,
    /// JSON catalogue on disk.
    Catalogue {
        path: Utf8PathBuf,
        max_distance_km: Option<f64>,
    },
    /// Nearest-airport HTTP service.
    Service { base_url: String },
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) airports: AirportSource,
    pub(crate) planner: PlannerConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        if let AirportSource::Catalogue { path, .. } = &self.airports {
            Self::require_existing(path, ARG_PLAN_AIRPORTS)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let airports = match (args.airports, args.airport_service) {
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingAirportSources {
                    catalogue: ARG_PLAN_AIRPORTS,
                    service: ARG_PLAN_AIRPORT_SERVICE,
                });
            }
            (Some(path), None) => AirportSource::Catalogue {
                path,
                max_distance_km: args.max_airport_km,
            },
            (None, _) if args.max_airport_km.is_some() => {
                return Err(CliError::RadiusWithoutCatalogue {
                    radius: ARG_PLAN_MAX_AIRPORT_KM,
                    catalogue: ARG_PLAN_AIRPORTS,
                });
            }
            (None, Some(base_url)) => AirportSource::Service { base_url },
            (None, None) => AirportSource::Disabled,
        };

        let defaults = PlannerConfig::default();
        let planner = PlannerConfig {
            seed: args.seed.unwrap_or(defaults.seed),
            candidates: args.candidates.unwrap_or(defaults.candidates),
            ..defaults
        };

        Ok(Self {
            request_path,
            airports,
            planner,
        })
    }
}

/// Builds the airport lookup for the current plan invocation.
pub(crate) trait LookupBuilder {
    fn build(&self, source: &AirportSource) -> Result<Box<dyn AirportLookup>, CliError>;
}

pub(crate) struct DefaultLookupBuilder;

/// Lookup used when no airport source is configured.
#[derive(Debug, Clone, Copy)]
struct NoAirportLookup;

impl AirportLookup for NoAirportLookup {
    fn nearest_airport(&self, _point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        Ok(None)
    }
}

impl LookupBuilder for DefaultLookupBuilder {
    fn build(&self, source: &AirportSource) -> Result<Box<dyn AirportLookup>, CliError> {
        match source {
            AirportSource::Disabled => Ok(Box::new(NoAirportLookup)),
            AirportSource::Catalogue {
                path,
                max_distance_km,
            } => {
                let catalog = load_airport_catalogue(path)?;
                Ok(Box::new(match *max_distance_km {
                    Some(km) => catalog.with_max_distance_km(km),
                    None => catalog,
                }))
            }
            AirportSource::Service { base_url } => {
                let lookup = HttpAirportLookup::new(base_url.clone()).map_err(|source| {
                    CliError::BuildAirportLookup {
                        base_url: base_url.clone(),
                        source,
                    }
                })?;
                Ok(Box::new(lookup))
            }
        }
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultLookupBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn LookupBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = execute_plan(args, builder)?;
    write_plan(writer, &plan)
}

fn execute_plan(args: PlanArgs, builder: &dyn LookupBuilder) -> Result<Plan, CliError> {
    let config = resolve_plan_config(args)?;
    let request = load_trip_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidTripRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let lookup = builder.build(&config.airports)?;
    log::debug!(
        "planning {} with {} candidate(s)",
        config.request_path,
        config.planner.candidates
    );
    let planner = ItineraryPlanner::with_config(lookup, config.planner);
    planner
        .optimize(&request)
        .map_err(|source| CliError::Plan { source })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`TripRequest`] from disk.
pub(crate) fn load_trip_request(path: &Utf8Path) -> Result<TripRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenTripRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseTripRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a JSON airport catalogue from disk.
pub(crate) fn load_airport_catalogue(path: &Utf8Path) -> Result<AirportCatalog, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenAirportCatalogue {
        path: path.to_path_buf(),
        source,
    })?;
    AirportCatalog::from_reader(BufReader::new(file)).map_err(|source| {
        CliError::LoadAirportCatalogue {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_plan(writer: &mut dyn Write, plan: &Plan) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plan).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
