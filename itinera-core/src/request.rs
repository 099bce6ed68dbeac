//! Trip requests and their validation.
//!
//! A [`TripRequest`] gathers the travelers, where they leave from, the time
//! window and the stops each traveler would like to visit. Planning stages
//! assume a request has passed [`TripRequest::validate`].

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use jiff::Timestamp;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Place, Traveler, TravelerId};

/// Lowest accepted stop priority.
pub const MIN_PRIORITY: u8 = 1;
/// Highest accepted stop priority.
pub const MAX_PRIORITY: u8 = 5;

/// Unique identifier of a desired stop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct DesiredStopId(pub String);

impl DesiredStopId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for DesiredStopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DesiredStopId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A destination nominated by one or more travelers.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::{DesiredStop, Place};
///
/// let stop = DesiredStop::new("kyoto", Place::new("Kyoto", Coord { x: 135.77, y: 35.01 }))
///     .requested_by("ana")
///     .with_priority(5)
///     .with_stay_hours(48.0);
/// assert_eq!(stop.priority, 5);
/// assert!(stop.requesters.iter().any(|id| id.0 == "ana"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesiredStop {
    /// Unique identifier.
    pub id: DesiredStopId,
    /// Where the stop is.
    pub place: Place,
    /// Travelers who asked for this stop.
    pub requesters: BTreeSet<TravelerId>,
    /// Importance from 1 (lowest) to 5 (highest).
    pub priority: u8,
    /// Required time on site, in hours.
    pub stay_hours: f64,
}

impl DesiredStop {
    /// Construct a stop with no requesters, priority 3 and no stay.
    pub fn new(id: impl Into<String>, place: Place) -> Self {
        Self {
            id: DesiredStopId::new(id),
            place,
            requesters: BTreeSet::new(),
            priority: 3,
            stay_hours: 0.0,
        }
    }

    /// Add a requester.
    #[must_use]
    pub fn requested_by(mut self, traveler: impl Into<String>) -> Self {
        self.requesters.insert(TravelerId::new(traveler));
        self
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Set the stay duration in hours.
    #[must_use]
    pub const fn with_stay_hours(mut self, stay_hours: f64) -> Self {
        self.stay_hours = stay_hours;
        self
    }

    /// Return whether `traveler` asked for this stop.
    #[must_use]
    pub fn is_requested_by(&self, traveler: &TravelerId) -> bool {
        self.requesters.contains(traveler)
    }
}

/// Everything the planner needs to build an itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TripRequest {
    /// Request identifier, reused in itinerary identifiers.
    pub id: String,
    /// Optional trip name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// People taking part.
    pub travelers: Vec<Traveler>,
    /// Where the trip starts.
    pub departure: Place,
    /// When the trip starts.
    pub start: Timestamp,
    /// Hard deadline; when absent the planner derives a generous budget.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<Timestamp>,
    /// Whether the trip finishes back at the departure place.
    #[cfg_attr(feature = "serde", serde(default))]
    pub return_to_departure: bool,
    /// Stops nominated by the travelers.
    pub stops: Vec<DesiredStop>,
}

/// Reasons a [`TripRequest`] is rejected before planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestValidationError {
    /// The request names no travelers.
    #[error("trip must include at least one traveler")]
    EmptyTravelerList,
    /// The request nominates no stops.
    #[error("trip must include at least one desired stop")]
    EmptyDesiredStops,
    /// The deadline precedes the start.
    #[error("trip end {end} is before its start {start}")]
    InvalidDateRange {
        /// Requested start.
        start: Timestamp,
        /// Requested end.
        end: Timestamp,
    },
    /// Two travelers share an identifier.
    #[error("traveler id {traveler} is used more than once")]
    DuplicateTravelerId {
        /// Repeated identifier.
        traveler: TravelerId,
    },
    /// Two stops share an identifier.
    #[error("stop id {stop} is used more than once")]
    DuplicateStopId {
        /// Repeated identifier.
        stop: DesiredStopId,
    },
    /// A stop has nobody asking for it.
    #[error("stop {stop} has no requesters")]
    EmptyRequesterSet {
        /// Offending stop.
        stop: DesiredStopId,
    },
    /// A stop names a requester who is not on the trip.
    #[error("stop {stop} is requested by unknown traveler {traveler}")]
    UnknownRequester {
        /// Offending stop.
        stop: DesiredStopId,
        /// Identifier missing from the traveler list.
        traveler: TravelerId,
    },
    /// A priority falls outside `1..=5`.
    #[error("stop {stop} has priority {priority}; expected 1 to 5")]
    InvalidPriority {
        /// Offending stop.
        stop: DesiredStopId,
        /// Supplied priority.
        priority: u8,
    },
    /// A stay is negative or not finite.
    #[error("stop {stop} has an invalid stay duration")]
    InvalidStayDuration {
        /// Offending stop.
        stop: DesiredStopId,
    },
}

impl TripRequest {
    /// Check the request's structure.
    ///
    /// Traveler list, stop list and date range are checked first, in that
    /// order; per-stop checks follow.
    ///
    /// # Errors
    /// Returns the first [`TripRequestValidationError`] found.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use jiff::Timestamp;
    /// use itinera_core::{Place, TripRequest, TripRequestValidationError};
    ///
    /// let request = TripRequest {
    ///     id: "empty".into(),
    ///     name: None,
    ///     travelers: Vec::new(),
    ///     departure: Place::new("Home", Coord { x: 0.0, y: 0.0 }),
    ///     start: Timestamp::UNIX_EPOCH,
    ///     end: None,
    ///     return_to_departure: false,
    ///     stops: Vec::new(),
    /// };
    /// assert_eq!(request.validate(), Err(TripRequestValidationError::EmptyTravelerList));
    /// ```
    pub fn validate(&self) -> Result<(), TripRequestValidationError> {
        if self.travelers.is_empty() {
            return Err(TripRequestValidationError::EmptyTravelerList);
        }
        if self.stops.is_empty() {
            return Err(TripRequestValidationError::EmptyDesiredStops);
        }
        if let Some(end) = self.end
            && self.start > end
        {
            return Err(TripRequestValidationError::InvalidDateRange {
                start: self.start,
                end,
            });
        }

        let mut travelers = HashSet::with_capacity(self.travelers.len());
        for traveler in &self.travelers {
            if !travelers.insert(&traveler.id) {
                return Err(TripRequestValidationError::DuplicateTravelerId {
                    traveler: traveler.id.clone(),
                });
            }
        }

        let mut stops = HashSet::with_capacity(self.stops.len());
        for stop in &self.stops {
            if !stops.insert(&stop.id) {
                return Err(TripRequestValidationError::DuplicateStopId {
                    stop: stop.id.clone(),
                });
            }
            validate_stop(stop, &travelers)?;
        }
        Ok(())
    }

    /// Look up a desired stop by identifier.
    #[must_use]
    pub fn stop(&self, id: &DesiredStopId) -> Option<&DesiredStop> {
        self.stops.iter().find(|stop| &stop.id == id)
    }

    /// Total stay hours across every desired stop.
    #[must_use]
    pub fn total_stay_hours(&self) -> f64 {
        self.stops.iter().map(|stop| stop.stay_hours).sum()
    }
}

fn validate_stop(
    stop: &DesiredStop,
    travelers: &HashSet<&TravelerId>,
) -> Result<(), TripRequestValidationError> {
    if stop.requesters.is_empty() {
        return Err(TripRequestValidationError::EmptyRequesterSet {
            stop: stop.id.clone(),
        });
    }
    if let Some(unknown) = stop.requesters.iter().find(|id| !travelers.contains(id)) {
        return Err(TripRequestValidationError::UnknownRequester {
            stop: stop.id.clone(),
            traveler: unknown.clone(),
        });
    }
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&stop.priority) {
        return Err(TripRequestValidationError::InvalidPriority {
            stop: stop.id.clone(),
            priority: stop.priority,
        });
    }
    if !stop.stay_hours.is_finite() || stop.stay_hours < 0.0 {
        return Err(TripRequestValidationError::InvalidStayDuration {
            stop: stop.id.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use jiff::SignedDuration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> TripRequest {
        TripRequest {
            id: "trip".into(),
            name: Some("Weekend".into()),
            travelers: vec![Traveler::new("ana", "Ana"), Traveler::new("ben", "Ben")],
            departure: Place::new("Home", Coord { x: 0.0, y: 0.0 }),
            start: Timestamp::UNIX_EPOCH,
            end: None,
            return_to_departure: false,
            stops: vec![
                DesiredStop::new("museum", Place::new("Museum", Coord { x: 0.0, y: 0.01 }))
                    .requested_by("ana")
                    .with_priority(4)
                    .with_stay_hours(24.0),
            ],
        }
    }

    #[rstest]
    fn accepts_well_formed_request(request: TripRequest) {
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    fn rejects_empty_stops(mut request: TripRequest) {
        request.stops.clear();
        assert_eq!(
            request.validate(),
            Err(TripRequestValidationError::EmptyDesiredStops)
        );
    }

    #[rstest]
    fn traveler_check_runs_before_stop_check(mut request: TripRequest) {
        request.travelers.clear();
        request.stops.clear();
        assert_eq!(
            request.validate(),
            Err(TripRequestValidationError::EmptyTravelerList)
        );
    }

    #[rstest]
    fn rejects_end_before_start(mut request: TripRequest) {
        let end = request
            .start
            .checked_sub(SignedDuration::from_hours(1))
            .expect("timestamp in range");
        request.end = Some(end);
        assert!(matches!(
            request.validate(),
            Err(TripRequestValidationError::InvalidDateRange { .. })
        ));
    }

    #[rstest]
    fn accepts_end_equal_to_start(mut request: TripRequest) {
        request.end = Some(request.start);
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn rejects_out_of_range_priority(mut request: TripRequest, #[case] priority: u8) {
        request.stops[0].priority = priority;
        assert!(matches!(
            request.validate(),
            Err(TripRequestValidationError::InvalidPriority { .. })
        ));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_stay(mut request: TripRequest, #[case] stay: f64) {
        request.stops[0].stay_hours = stay;
        assert!(matches!(
            request.validate(),
            Err(TripRequestValidationError::InvalidStayDuration { .. })
        ));
    }

    #[rstest]
    fn rejects_unknown_requester(mut request: TripRequest) {
        request.stops[0].requesters.insert(TravelerId::new("zoe"));
        let err = request.validate().expect_err("unknown requester");
        assert_eq!(
            err,
            TripRequestValidationError::UnknownRequester {
                stop: DesiredStopId::new("museum"),
                traveler: TravelerId::new("zoe"),
            }
        );
    }

    #[rstest]
    fn rejects_stop_without_requesters(mut request: TripRequest) {
        request.stops[0].requesters.clear();
        assert!(matches!(
            request.validate(),
            Err(TripRequestValidationError::EmptyRequesterSet { .. })
        ));
    }

    #[rstest]
    fn rejects_duplicate_ids(mut request: TripRequest) {
        let copy = request.stops[0].clone();
        request.stops.push(copy);
        assert!(matches!(
            request.validate(),
            Err(TripRequestValidationError::DuplicateStopId { .. })
        ));

        request.stops.pop();
        request.travelers.push(Traveler::new("ana", "Another Ana"));
        assert!(matches!(
            request.validate(),
            Err(TripRequestValidationError::DuplicateTravelerId { .. })
        ));
    }
}
