//! Core domain types for the Itinera trip planner.
//!
//! The crate models trip requests (travelers, desired stops, a departure
//! place and a time window), the itineraries produced for them, and the
//! seams the planner is built around:
//!
//! - [`AirportLookup`] resolves the nearest airport to a coordinate.
//! - [`StopSelector`] and [`StopSequencer`] are the replaceable selection and
//!   ordering strategies.
//! - [`TripOptimizer`] is the single operation exposed to callers.
//!
//! Requests are validated with [`TripRequest::validate`] before any planning
//! stage runs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod airport;
pub mod distance;
pub mod itinerary;
pub mod place;
pub mod plan;
pub mod request;
pub mod strategy;
pub mod traveler;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use airport::{AirportLookup, AirportLookupError};
pub use distance::{GeoPoint, haversine_km};
pub use itinerary::{Itinerary, ItineraryStop, ItineraryStopId, Leg, LegId, StopKind, TransportMode};
pub use place::Place;
pub use plan::{CancelToken, Plan, PlanError, PlanScore, PlanWarning, TripOptimizer};
pub use request::{
    DesiredStop, DesiredStopId, MAX_PRIORITY, MIN_PRIORITY, TripRequest, TripRequestValidationError,
};
pub use strategy::{StopSelector, StopSequencer};
pub use traveler::{PALETTE, Traveler, TravelerId, assign_palette};
