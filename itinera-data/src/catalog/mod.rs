//! In-memory airport catalogue backed by an R\*-tree.
//!
//! The catalogue is loaded once from a JSON array of places and answers
//! nearest-airport queries without any I/O. The tree ranks candidates by
//! planar distance in degrees; the closest few are then re-ranked by
//! great-circle distance so high latitudes do not skew the answer. Queries
//! are repeated one full turn either side so the antimeridian is no barrier.

use std::io::Read;

use itinera_core::{AirportLookup, AirportLookupError, GeoPoint, Place, haversine_km};
use rstar::RTree;
use rstar::primitives::GeomWithData;
use thiserror::Error;

/// Number of planar neighbours re-ranked by great-circle distance.
const CANDIDATES: usize = 8;

type IndexedAirport = GeomWithData<[f64; 2], usize>;

/// Errors raised while building a catalogue.
#[derive(Debug, Error)]
pub enum AirportCatalogError {
    /// The catalogue JSON could not be decoded.
    #[error("failed to parse airport catalogue: {source}")]
    Parse {
        /// Decoder error returned by `serde_json`.
        #[from]
        source: serde_json::Error,
    },
    /// An entry lies outside valid longitude and latitude ranges.
    #[error("airport {name} has invalid coordinates ({lon}, {lat})")]
    InvalidCoordinate {
        /// Name of the offending airport.
        name: String,
        /// Longitude read from the catalogue.
        lon: f64,
        /// Latitude read from the catalogue.
        lat: f64,
    },
}

/// Airports indexed for nearest-neighbour lookups.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::{AirportLookup, Place};
/// use itinera_data::AirportCatalog;
///
/// let catalog = AirportCatalog::from_airports(vec![
///     Place::new("Heathrow Airport", Coord { x: -0.45, y: 51.47 }),
///     Place::new("Haneda Airport", Coord { x: 139.78, y: 35.55 }),
/// ])?;
/// let nearest = catalog.nearest(Coord { x: -0.13, y: 51.51 });
/// assert_eq!(nearest.map(|a| a.name.as_str()), Some("Heathrow Airport"));
/// # Ok::<(), itinera_data::AirportCatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AirportCatalog {
    airports: Vec<Place>,
    index: RTree<IndexedAirport>,
    max_distance_km: Option<f64>,
}

impl AirportCatalog {
    /// Index `airports`. Every entry is treated as an airport whatever its
    /// name says.
    ///
    /// # Errors
    /// Returns [`AirportCatalogError::InvalidCoordinate`] for entries outside
    /// `-180..=180` longitude or `-90..=90` latitude.
    pub fn from_airports(airports: Vec<Place>) -> Result<Self, AirportCatalogError> {
        let mut checked = Vec::with_capacity(airports.len());
        for airport in airports {
            validate_location(&airport)?;
            checked.push(airport.with_airport(true));
        }
        let entries = checked
            .iter()
            .enumerate()
            .map(|(slot, airport)| {
                IndexedAirport::new([airport.location.x, airport.location.y], slot)
            })
            .collect();
        log::debug!("indexed {} airports", checked.len());
        Ok(Self {
            airports: checked,
            index: RTree::bulk_load(entries),
            max_distance_km: None,
        })
    }

    /// Read a JSON array of places and index them.
    ///
    /// # Errors
    /// Returns [`AirportCatalogError`] when the JSON is malformed or an entry
    /// has invalid coordinates.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AirportCatalogError> {
        let airports: Vec<Place> = serde_json::from_reader(reader)?;
        Self::from_airports(airports)
    }

    /// Ignore airports further than `km` from the queried point.
    #[must_use]
    pub const fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    /// Number of indexed airports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Whether the catalogue holds no airports.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Indexed airports in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.airports.iter()
    }

    /// The airport closest to `point` by great-circle distance, if any lies
    /// within the configured radius.
    ///
    /// The planar tree also gets queried one full turn east and west of
    /// `point`, so airports just across the antimeridian stay reachable.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "wrapping longitude by a full turn")]
    pub fn nearest(&self, point: GeoPoint) -> Option<&Place> {
        [point.x, point.x - 360.0, point.x + 360.0]
            .into_iter()
            .flat_map(|lon| {
                self.index
                    .nearest_neighbor_iter(&[lon, point.y])
                    .take(CANDIDATES)
            })
            .filter_map(|entry| self.airports.get(entry.data))
            .map(|airport| (haversine_km(point, airport.location), airport))
            .filter(|(distance, _)| self.max_distance_km.is_none_or(|max| *distance <= max))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, airport)| airport)
    }
}

impl AirportLookup for AirportCatalog {
    fn nearest_airport(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        Ok(self.nearest(point).cloned())
    }
}

fn validate_location(airport: &Place) -> Result<(), AirportCatalogError> {
    let GeoPoint { x: lon, y: lat } = airport.location;
    if (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(AirportCatalogError::InvalidCoordinate {
            name: airport.name.clone(),
            lon,
            lat,
        })
    }
}
