//! Replaceable selection and ordering strategies.
//!
//! The planner picks stops through a [`StopSelector`] and orders them through
//! a [`StopSequencer`]. The greedy defaults live in `itinera-planner`; a
//! stronger optimiser can be substituted without touching scheduling,
//! trimming or scoring.

use crate::{DesiredStop, Place, TripRequest};

/// Choose which desired stops fit a time budget.
pub trait StopSelector: Send + Sync {
    /// Return the stops to visit. Their total stay must not exceed
    /// `budget_hours`; order is irrelevant.
    ///
    /// `seed` drives any randomised tie-breaking so that equal inputs give
    /// equal outputs.
    fn select(&self, request: &TripRequest, budget_hours: f64, seed: u64) -> Vec<DesiredStop>;
}

/// Order selected stops into a visiting sequence.
pub trait StopSequencer: Send + Sync {
    /// Return `stops` reordered for travel from `departure`. The departure
    /// place itself is not part of the output.
    fn sequence(
        &self,
        departure: &Place,
        stops: Vec<DesiredStop>,
        return_to_departure: bool,
    ) -> Vec<DesiredStop>;
}
