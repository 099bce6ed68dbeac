//! Planner results, failures and the optimiser entry point.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use jiff::Timestamp;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Itinerary, Place, TripRequest, TripRequestValidationError};

/// Fatal planning failures. No partial itinerary accompanies these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request failed validation; fix it and resubmit.
    #[error("invalid trip request: {0}")]
    Invalid(#[from] TripRequestValidationError),
    /// No desired stop fits the time budget.
    #[error(
        "no desired stop fits the {budget_hours:.1}h time budget; lengthen the trip or remove stops"
    )]
    NoFeasibleItinerary {
        /// Budget the selector worked with, in hours.
        budget_hours: f64,
    },
    /// Schedule arithmetic left the supported timestamp range.
    #[error("itinerary dates overflow the supported range")]
    ScheduleOverflow,
    /// The caller cancelled the run.
    #[error("planning was cancelled")]
    Cancelled,
}

/// Non-fatal issues attached to a returned plan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "warning", rename_all = "snake_case")
)]
pub enum PlanWarning {
    /// A flying leg was travelled over land because no airport was found.
    AirportLookupUnavailable {
        /// Name of the leg's origin.
        from: String,
        /// Name of the leg's destination.
        to: String,
        /// Why the lookup failed.
        reason: String,
    },
    /// Shortening stays did not bring the itinerary inside the deadline.
    DeadlineOverrunAfterTrim {
        /// Requested end of the trip.
        deadline: Timestamp,
        /// Arrival at the final stop after trimming.
        final_arrival: Timestamp,
    },
}

/// Ranking scores for a plan, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanScore {
    /// How evenly satisfaction is spread across travelers.
    pub equality: f64,
    /// How little distance and time the itinerary consumes.
    pub efficiency: f64,
    /// Weighted blend used to rank candidates.
    pub combined: f64,
}

impl PlanScore {
    /// The same scores on a 0-100 scale, for display.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "scaling scores to percentages")]
    pub fn as_percent(&self) -> Self {
        Self {
            equality: self.equality * 100.0,
            efficiency: self.efficiency * 100.0,
            combined: self.combined * 100.0,
        }
    }
}

/// A scored itinerary with any warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan {
    /// The chosen itinerary.
    pub itinerary: Itinerary,
    /// Its ranking scores.
    pub score: PlanScore,
    /// Degradations recovered from while planning.
    pub warnings: Vec<PlanWarning>,
}

impl Plan {
    /// Rebuild `original` restricted to the stops this plan visits.
    ///
    /// Travelers, departure, dates and the return flag are kept; stops keep
    /// their requested stay durations.
    #[must_use]
    pub fn implied_request(&self, original: &TripRequest) -> TripRequest {
        let visited = self.itinerary.visited();
        TripRequest {
            stops: original
                .stops
                .iter()
                .filter(|stop| visited.contains(&stop.id))
                .cloned()
                .collect(),
            ..original.clone()
        }
    }

    /// Places in visiting order, including waypoints.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.itinerary.stops.iter().map(|stop| &stop.place)
    }
}

/// Cooperative cancellation shared between a caller and a planning run.
///
/// Clones observe the same flag.
///
/// # Examples
/// ```
/// use itinera_core::CancelToken;
///
/// let token = CancelToken::new();
/// let observer = token.clone();
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Return [`PlanError::Cancelled`] once cancellation was requested.
    ///
    /// # Errors
    /// Fails when the token has been cancelled.
    pub fn check(&self) -> Result<(), PlanError> {
        if self.is_cancelled() {
            Err(PlanError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Plan a trip.
///
/// Implementations validate the request, choose and order stops, schedule
/// them and return the best-scoring itinerary. Optimisers must be
/// `Send + Sync` to run across threads.
pub trait TripOptimizer: Send + Sync {
    /// Plan `request`, stopping early with [`PlanError::Cancelled`] once
    /// `cancel` fires.
    ///
    /// # Errors
    /// Returns [`PlanError`] for invalid requests, infeasible budgets,
    /// cancellation or date overflow.
    fn optimize_with_cancel(
        &self,
        request: &TripRequest,
        cancel: &CancelToken,
    ) -> Result<Plan, PlanError>;

    /// Plan `request` to completion.
    ///
    /// # Errors
    /// See [`TripOptimizer::optimize_with_cancel`].
    fn optimize(&self, request: &TripRequest) -> Result<Plan, PlanError> {
        self.optimize_with_cancel(request, &CancelToken::new())
    }
}
