//! Error types emitted by the Itinera CLI.
//!
//! Many helpers return `Result<_, CliError>` and the workspace denies
//! `clippy::result_large_err`, so large payloads stay boxed or behind `Arc`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use itinera_core::{PlanError, TripRequestValidationError};
use itinera_data::{AirportCatalogError, LookupBuildError};
use thiserror::Error;

/// Errors emitted by the Itinera CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Both an airport catalogue and an airport service were configured.
    #[error("--{catalogue} and --{service} cannot be used together")]
    ConflictingAirportSources {
        /// Catalogue flag name.
        catalogue: &'static str,
        /// Service flag name.
        service: &'static str,
    },
    /// A catalogue search radius was given without a catalogue.
    #[error("--{radius} only applies to --{catalogue}")]
    RadiusWithoutCatalogue {
        /// Radius flag name.
        radius: &'static str,
        /// Catalogue flag name.
        catalogue: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the trip request file failed.
    #[error("failed to open trip request at {path:?}: {source}")]
    OpenTripRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Trip request JSON could not be decoded.
    #[error("failed to parse trip request JSON at {path:?}: {source}")]
    ParseTripRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The trip request failed validation.
    #[error("trip request in {path:?} failed validation: {source}")]
    InvalidTripRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// First rule the request broke.
        #[source]
        source: TripRequestValidationError,
    },
    /// Opening the airport catalogue failed.
    #[error("failed to open airport catalogue at {path:?}: {source}")]
    OpenAirportCatalogue {
        /// Catalogue path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The airport catalogue could not be loaded.
    #[error("failed to load airport catalogue at {path:?}: {source}")]
    LoadAirportCatalogue {
        /// Catalogue path.
        path: Utf8PathBuf,
        /// Catalogue error.
        #[source]
        source: AirportCatalogError,
    },
    /// Constructing the HTTP airport lookup failed.
    #[error("failed to build airport lookup for {base_url:?}: {source}")]
    BuildAirportLookup {
        /// Service base URL.
        base_url: String,
        /// Construction error.
        #[source]
        source: LookupBuildError,
    },
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan {
        /// Planner error.
        #[source]
        source: PlanError,
    },
    /// Serialising the plan failed.
    #[error("failed to serialise plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// Writing the plan failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
