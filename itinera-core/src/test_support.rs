//! Test-only airport lookups and request builders used by unit and behaviour
//! tests.

use std::collections::BTreeSet;

use geo::Coord;
use jiff::{SignedDuration, Timestamp};

use crate::{
    AirportLookup, AirportLookupError, DesiredStop, GeoPoint, Place, Traveler, TripRequest,
    haversine_km,
};

/// Lookup that never finds an airport.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoAirports;

impl AirportLookup for NoAirports {
    fn nearest_airport(&self, _point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        Ok(None)
    }
}

/// Lookup that always fails as if the service were down.
#[derive(Debug, Default, Copy, Clone)]
pub struct OfflineAirports;

impl AirportLookup for OfflineAirports {
    fn nearest_airport(&self, _point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        Err(AirportLookupError::Unavailable {
            message: "offline".to_owned(),
        })
    }
}

/// Lookup that scans a fixed list of airports linearly.
///
/// Intended only for small datasets.
#[derive(Debug, Default, Clone)]
pub struct FixedAirports {
    airports: Vec<Place>,
}

impl FixedAirports {
    /// Create a lookup over `airports`.
    pub fn with_airports<I>(airports: I) -> Self
    where
        I: IntoIterator<Item = Place>,
    {
        Self {
            airports: airports.into_iter().collect(),
        }
    }
}

impl AirportLookup for FixedAirports {
    fn nearest_airport(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        Ok(self
            .airports
            .iter()
            .min_by(|a, b| {
                haversine_km(point, a.location).total_cmp(&haversine_km(point, b.location))
            })
            .cloned())
    }
}

/// Place at `(lon, lat)` with the given name.
pub fn place(name: &str, lon: f64, lat: f64) -> Place {
    Place::new(name, Coord { x: lon, y: lat })
}

/// Stop requested by `requesters` with a priority and a stay in hours.
pub fn stop(
    id: &str,
    place: Place,
    requesters: &[&str],
    priority: u8,
    stay_hours: f64,
) -> DesiredStop {
    DesiredStop {
        id: id.into(),
        place,
        requesters: requesters.iter().map(|&r| r.into()).collect::<BTreeSet<_>>(),
        priority,
        stay_hours,
    }
}

/// Fixed start instant used across tests: 2024-05-01T00:00:00Z.
pub fn start_instant() -> Timestamp {
    Timestamp::from_second(1_714_521_600).unwrap_or(Timestamp::UNIX_EPOCH)
}

/// Shift [`start_instant`] by a number of hours.
pub fn hours_after_start(hours: i64) -> Timestamp {
    start_instant()
        .checked_add(SignedDuration::from_hours(hours))
        .unwrap_or(Timestamp::MAX)
}

/// Request departing from `departure` with one traveler per id in `travelers`.
pub fn request(departure: Place, travelers: &[&str], stops: Vec<DesiredStop>) -> TripRequest {
    TripRequest {
        id: "trip".to_owned(),
        name: None,
        travelers: travelers
            .iter()
            .map(|&id| Traveler::new(id, id.to_uppercase()))
            .collect(),
        departure,
        start: start_instant(),
        end: None,
        return_to_departure: false,
        stops,
    }
}
