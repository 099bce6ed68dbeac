//! Facade crate for the Itinera trip planner.
//!
//! This crate re-exports the core domain types and exposes the default
//! planner and airport lookups behind feature flags.

#![forbid(unsafe_code)]

pub use itinera_core::{
    AirportLookup, AirportLookupError, CancelToken, DesiredStop, DesiredStopId, GeoPoint,
    Itinerary, ItineraryStop, ItineraryStopId, Leg, LegId, Place, Plan, PlanError, PlanScore,
    PlanWarning, StopKind, StopSelector, StopSequencer, TransportMode, Traveler, TravelerId,
    TripOptimizer, TripRequest, TripRequestValidationError, assign_palette, haversine_km,
};

#[cfg(feature = "planner")]
pub use itinera_planner::{
    FairGreedySelector, ItineraryPlanner, NearestNeighbourSequencer, PlannerConfig, SpeedModel,
    TransportPolicy,
};

#[cfg(feature = "airports")]
pub use itinera_data::{AirportCatalog, AirportCatalogError, HttpAirportLookup, HttpAirportLookupConfig};
