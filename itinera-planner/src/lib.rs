//! Greedy multi-traveler trip planner for Itinera.
//!
//! This crate provides [`ItineraryPlanner`], the default implementation of
//! the [`TripOptimizer`](itinera_core::TripOptimizer) trait. A run validates
//! the request and then, for each seeded candidate:
//!
//! 1. picks stops fairly within the time budget ([`FairGreedySelector`]);
//! 2. orders them by nearest neighbour ([`NearestNeighbourSequencer`]);
//! 3. schedules legs, flying long hops through the nearest airports
//!    ([`ItineraryBuilder`]);
//! 4. shortens long stays to meet the trip's end date
//!    ([`trim_to_deadline`]);
//! 5. scores the result ([`plan_score`]).
//!
//! Candidates run in parallel on the `rayon` pool and the best combined
//! score wins. Every stage is deterministic for a given seed.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod planner;
mod schedule;
mod score;
mod select;
mod sequence;
mod transport;
mod trim;

pub use config::PlannerConfig;
pub use planner::ItineraryPlanner;
pub use schedule::{BuiltItinerary, ItineraryBuilder};
pub use score::{efficiency_score, equality_score, pick_best, plan_score, traveler_satisfaction};
pub use select::{FairGreedySelector, time_budget_hours};
pub use sequence::{NearestNeighbourSequencer, distance_matrix};
pub use transport::{SpeedModel, TransportPolicy};
pub use trim::{TrimOutcome, trim_to_deadline};
