//! Nearest-airport lookups.
//!
//! The planner calls an [`AirportLookup`] only for legs that fly and whose
//! endpoint is not already an airport. A lookup that finds nothing, or fails,
//! is not fatal: the leg is travelled over land instead.

use thiserror::Error;

use crate::{GeoPoint, Place};

/// Errors a lookup collaborator may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AirportLookupError {
    /// The lookup source is not reachable or not configured.
    #[error("airport lookup unavailable: {message}")]
    Unavailable {
        /// Human-readable detail.
        message: String,
    },
    /// The request timed out.
    #[error("airport lookup at {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with an error status.
    #[error("airport lookup at {url} failed with HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Human-readable detail.
        message: String,
    },
    /// The response could not be decoded.
    #[error("failed to parse airport lookup response: {message}")]
    Parse {
        /// Human-readable detail.
        message: String,
    },
}

/// Find the airport nearest to a coordinate.
///
/// Implementations must be `Send + Sync`; the planner resolves independent
/// legs concurrently.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use itinera_core::{AirportLookup, AirportLookupError, GeoPoint, Place};
///
/// struct SingleAirport(Place);
///
/// impl AirportLookup for SingleAirport {
///     fn nearest_airport(&self, _point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
///         Ok(Some(self.0.clone()))
///     }
/// }
///
/// let lookup = SingleAirport(Place::new("Gatwick Airport", Coord { x: -0.19, y: 51.15 }));
/// let found = lookup.nearest_airport(Coord { x: 0.0, y: 51.0 })?;
/// assert!(found.is_some_and(|airport| airport.is_airport));
/// # Ok::<(), AirportLookupError>(())
/// ```
pub trait AirportLookup: Send + Sync {
    /// Return the nearest airport to `point`, or `None` when there is none.
    ///
    /// # Errors
    /// Returns [`AirportLookupError`] when the source cannot answer.
    fn nearest_airport(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError>;
}

impl<T: AirportLookup + ?Sized> AirportLookup for &T {
    fn nearest_airport(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        (**self).nearest_airport(point)
    }
}

impl<T: AirportLookup + ?Sized> AirportLookup for Box<T> {
    fn nearest_airport(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        (**self).nearest_airport(point)
    }
}
