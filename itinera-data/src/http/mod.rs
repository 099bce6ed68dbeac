//! HTTP-backed [`AirportLookup`] for a nearest-airport service.
//!
//! [`AirportLookup`] is synchronous so the planner stays embeddable in
//! synchronous code. [`HttpAirportLookup`] bridges to async `reqwest` by
//! blocking on a Tokio runtime it owns.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use itinera_core::AirportLookup;
//! use itinera_data::HttpAirportLookup;
//!
//! let lookup = HttpAirportLookup::new("http://localhost:8080")?;
//! let airport = lookup.nearest_airport(Coord { x: -0.13, y: 51.51 })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod response;

use std::time::Duration;

use itinera_core::{AirportLookup, AirportLookupError, GeoPoint, Place};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use self::response::NearestAirportResponse;

/// Errors raised while constructing an [`HttpAirportLookup`].
#[derive(Debug, Error)]
pub enum LookupBuildError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The Tokio runtime could not be built.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for lookup requests.
pub const DEFAULT_USER_AGENT: &str = "itinera-airports/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpAirportLookup`].
#[derive(Debug, Clone)]
pub struct HttpAirportLookupConfig {
    /// Service base URL, e.g. `"http://localhost:8080"`.
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with each request.
    pub user_agent: String,
}

impl Default for HttpAirportLookupConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpAirportLookupConfig {
    /// Configuration pointing at `base_url` with default timeout and agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Nearest-airport lookup served over HTTP.
///
/// Outside any Tokio runtime, or inside a `current_thread` one, requests run
/// on the lookup's own runtime. Inside a multi-threaded runtime the caller's
/// handle is used through [`tokio::task::block_in_place`].
///
/// Failures map onto [`AirportLookupError`]; the planner treats every one of
/// them as "no airport" and travels the leg over land.
pub struct HttpAirportLookup {
    client: Client,
    config: HttpAirportLookupConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpAirportLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAirportLookup")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpAirportLookup {
    /// Lookup against `base_url` with default settings.
    ///
    /// # Errors
    /// Returns [`LookupBuildError`] if the client or runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupBuildError> {
        Self::with_config(HttpAirportLookupConfig::new(base_url))
    }

    /// Lookup with explicit configuration.
    ///
    /// # Errors
    /// Returns [`LookupBuildError`] if the client or runtime fails to build.
    pub fn with_config(config: HttpAirportLookupConfig) -> Result<Self, LookupBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(LookupBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(LookupBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpAirportLookupConfig {
        &self.config
    }

    fn nearest_url(&self, point: GeoPoint) -> String {
        format!(
            "{}/airports/nearest?lon={}&lat={}",
            self.config.base_url.trim_end_matches('/'),
            point.x,
            point.y
        )
    }

    async fn fetch_nearest(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        let url = self.nearest_url(point);
        log::debug!("querying nearest airport at {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let body: NearestAirportResponse =
            response
                .json()
                .await
                .map_err(|err| AirportLookupError::Parse {
                    message: err.to_string(),
                })?;

        Ok(body.into_airport())
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> AirportLookupError {
        if error.is_timeout() {
            return AirportLookupError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return AirportLookupError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        AirportLookupError::Unavailable {
            message: format!("{url}: {error}"),
        }
    }
}

impl AirportLookup for HttpAirportLookup {
    fn nearest_airport(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        let future = self.fetch_nearest(point);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
