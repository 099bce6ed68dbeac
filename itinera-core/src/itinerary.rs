//! Dated itineraries produced by the planner.
//!
//! An [`Itinerary`] is an ordered list of [`ItineraryStop`] values joined by
//! [`Leg`] values, one per consecutive pair of stops. The first stop is always
//! the departure place at the trip's start.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use jiff::{SignedDuration, Timestamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DesiredStopId, Place, TravelerId};

/// Sequence number of a stop within one itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ItineraryStopId(pub u32);

/// Sequence number of a leg within one itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct LegId(pub u32);

/// Why a stop is part of the itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", content = "stop", rename_all = "snake_case")
)]
pub enum StopKind {
    /// The trip's starting point.
    Departure,
    /// A desired stop chosen by the planner.
    Visit(DesiredStopId),
    /// An airport passed through on a flying leg.
    Airport,
    /// The final return to the departure place.
    Return,
}

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TransportMode {
    /// Road or rail.
    Land,
    /// Flight between airports.
    Air,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Land => f.write_str("land"),
            Self::Air => f.write_str("air"),
        }
    }
}

/// A dated stop in an itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItineraryStop {
    /// Position-derived identifier.
    pub id: ItineraryStopId,
    /// Role of the stop.
    pub kind: StopKind,
    /// Where the stop is.
    pub place: Place,
    /// When travelers arrive.
    pub arrival: Timestamp,
    /// When travelers leave; never before `arrival`.
    pub departure: Timestamp,
    /// Travelers who asked for the stop; empty for departure, return and
    /// airport stops.
    pub requesters: BTreeSet<TravelerId>,
}

impl ItineraryStop {
    /// Time spent at the stop.
    #[must_use]
    pub fn stay(&self) -> SignedDuration {
        self.departure.duration_since(self.arrival)
    }

    /// The desired stop this itinerary stop fulfils, if any.
    #[must_use]
    pub const fn desired_stop(&self) -> Option<&DesiredStopId> {
        match &self.kind {
            StopKind::Visit(id) => Some(id),
            StopKind::Departure | StopKind::Airport | StopKind::Return => None,
        }
    }

    /// Whether this is an airport waypoint.
    #[must_use]
    pub const fn is_airport_waypoint(&self) -> bool {
        matches!(self.kind, StopKind::Airport)
    }
}

/// A single hop between consecutive stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    /// Position-derived identifier.
    pub id: LegId,
    /// Stop the leg leaves from.
    pub from: ItineraryStopId,
    /// Stop the leg arrives at.
    pub to: ItineraryStopId,
    /// Transport used.
    pub mode: TransportMode,
    /// Estimated travel time in hours.
    pub duration_hours: f64,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
}

/// A complete, dated plan for a trip.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Itinerary {
    /// Identifier derived from the request and candidate.
    pub id: String,
    /// Stops in visiting order.
    pub stops: Vec<ItineraryStop>,
    /// Legs joining consecutive stops.
    pub legs: Vec<Leg>,
    /// Satisfaction per traveler, in `0.0..=1.0`.
    pub satisfaction: BTreeMap<TravelerId, f64>,
}

impl Itinerary {
    /// The first stop; the departure place for any planned itinerary.
    #[must_use]
    pub fn first_stop(&self) -> Option<&ItineraryStop> {
        self.stops.first()
    }

    /// The final stop.
    #[must_use]
    pub fn last_stop(&self) -> Option<&ItineraryStop> {
        self.stops.last()
    }

    /// Look up a stop by identifier.
    #[must_use]
    pub fn stop(&self, id: ItineraryStopId) -> Option<&ItineraryStop> {
        self.stops.iter().find(|stop| stop.id == id)
    }

    /// Identifiers of the desired stops the itinerary visits.
    #[must_use]
    pub fn visited(&self) -> BTreeSet<&DesiredStopId> {
        self.stops
            .iter()
            .filter_map(ItineraryStop::desired_stop)
            .collect()
    }

    /// Whether arrivals never decrease along the itinerary.
    #[must_use]
    pub fn is_chronological(&self) -> bool {
        self.stops
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.arrival <= b.arrival))
    }

    /// Whether every leg refers to stops present in the itinerary.
    #[must_use]
    pub fn legs_reference_stops(&self) -> bool {
        let ids: BTreeSet<ItineraryStopId> = self.stops.iter().map(|stop| stop.id).collect();
        self.legs
            .iter()
            .all(|leg| ids.contains(&leg.from) && ids.contains(&leg.to))
    }

    /// Sum of leg distances in kilometres.
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_km).sum()
    }

    /// Sum of leg durations in hours.
    #[must_use]
    pub fn total_travel_hours(&self) -> f64 {
        self.legs.iter().map(|leg| leg.duration_hours).sum()
    }
}
