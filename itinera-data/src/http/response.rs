//! Wire types for the nearest-airport service.
//!
//! The service answers `GET /airports/nearest?lon=..&lat=..` with a JSON
//! object whose `airport` member is a place record or `null`.

use itinera_core::Place;
use serde::Deserialize;

/// Body returned by the nearest-airport endpoint.
#[derive(Debug, Deserialize)]
pub struct NearestAirportResponse {
    /// Closest airport known to the service, if any.
    #[serde(default)]
    pub airport: Option<Place>,
}

impl NearestAirportResponse {
    /// The reported airport, flagged as one regardless of its name.
    #[must_use]
    pub fn into_airport(self) -> Option<Place> {
        self.airport.map(|airport| airport.with_airport(true))
    }
}
