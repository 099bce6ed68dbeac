//! Named locations that stops, departures and airports refer to.

use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Words that mark a place name as an airport, compared case-insensitively.
const AIRPORT_MARKERS: [&str; 10] = [
    "airport",
    "aeropuerto",
    "aéroport",
    "flughafen",
    "aeroporto",
    "luchthaven",
    "lotnisko",
    "空港",
    "机场",
    "공항",
];

/// A resolved, named location.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Whether the
/// place is an airport is decided once, when the place is constructed or
/// decoded, and carried as [`Place::is_airport`].
///
/// Two places are equal when their names and coordinates match; country,
/// region and the airport flag do not take part in the comparison.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::Place;
///
/// let heathrow = Place::new("Heathrow Airport", Coord { x: -0.45, y: 51.47 });
/// assert!(heathrow.is_airport);
///
/// let soho = Place::new("Soho", Coord { x: -0.13, y: 51.51 }).with_country("GB");
/// assert!(!soho.is_airport);
/// assert_eq!(soho.country.as_deref(), Some("GB"));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PlaceRecord"))]
pub struct Place {
    /// Display name.
    pub name: String,
    /// Country name or code, when known.
    pub country: Option<String>,
    /// Region, state or province, when known.
    pub region: Option<String>,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Whether this place is itself an airport.
    pub is_airport: bool,
}

impl Place {
    /// Construct a place, classifying it as an airport from its name.
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        let owned = name.into();
        let is_airport = looks_like_airport(&owned);
        Self {
            name: owned,
            country: None,
            region: None,
            location,
            is_airport,
        }
    }

    /// Attach a country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Attach a region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Override the airport classification derived from the name.
    #[must_use]
    pub const fn with_airport(mut self, is_airport: bool) -> Self {
        self.is_airport = is_airport;
        self
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.location == other.location
    }
}

/// Return whether a place name contains a known airport marker.
///
/// # Examples
/// ```
/// use itinera_core::place::looks_like_airport;
///
/// assert!(looks_like_airport("Flughafen München"));
/// assert!(looks_like_airport("NARITA AIRPORT"));
/// assert!(!looks_like_airport("Old Town"));
/// ```
#[must_use]
pub fn looks_like_airport(name: &str) -> bool {
    let lowered = name.to_lowercase();
    AIRPORT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Wire shape for [`Place`]; the airport flag is optional and derived from
/// the name when absent.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PlaceRecord {
    name: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    region: Option<String>,
    location: Coord<f64>,
    #[serde(default)]
    is_airport: Option<bool>,
}

#[cfg(feature = "serde")]
impl From<PlaceRecord> for Place {
    fn from(record: PlaceRecord) -> Self {
        let is_airport = record
            .is_airport
            .unwrap_or_else(|| looks_like_airport(&record.name));
        Self {
            name: record.name,
            country: record.country,
            region: record.region,
            location: record.location,
            is_airport,
        }
    }
}
