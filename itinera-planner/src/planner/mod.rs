//! `ItineraryPlanner`: the default [`TripOptimizer`].
//!
//! Runs validation, selection, sequencing, scheduling, trimming and scoring
//! for one or more seeded candidates and returns the best-scoring plan.

use itinera_core::{
    AirportLookup, CancelToken, DesiredStop, Plan, PlanError, StopSelector, StopSequencer,
    TripOptimizer, TripRequest,
};
use rayon::prelude::*;

use crate::schedule::ItineraryBuilder;
use crate::score::{pick_best, plan_score, traveler_satisfaction};
use crate::trim::trim_to_deadline;
use crate::{FairGreedySelector, NearestNeighbourSequencer, PlannerConfig, time_budget_hours};

/// Greedy multi-traveler trip planner.
///
/// The planner is generic over its seams: an airport lookup, a stop selector
/// and a stop sequencer. [`ItineraryPlanner::new`] wires in the fair greedy
/// selector and the nearest-neighbour sequencer.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::{
///     AirportLookup, AirportLookupError, DesiredStop, GeoPoint, Place, Traveler, TripOptimizer,
///     TripRequest,
/// };
/// use itinera_planner::ItineraryPlanner;
/// use jiff::Timestamp;
///
/// struct NoAirports;
///
/// impl AirportLookup for NoAirports {
///     fn nearest_airport(&self, _point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
///         Ok(None)
///     }
/// }
///
/// let home = Place::new("Home", Coord { x: 0.0, y: 0.0 });
/// let museum = Place::new("Museum", Coord { x: 0.0, y: 0.1 });
/// let request = TripRequest {
///     id: "weekend".into(),
///     name: None,
///     travelers: vec![Traveler::new("ana", "Ana")],
///     departure: home,
///     start: Timestamp::UNIX_EPOCH,
///     end: None,
///     return_to_departure: true,
///     stops: vec![DesiredStop::new("museum", museum).requested_by("ana").with_stay_hours(3.0)],
/// };
/// let plan = ItineraryPlanner::new(NoAirports).optimize(&request)?;
/// assert_eq!(plan.itinerary.visited().len(), 1);
/// # Ok::<(), itinera_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryPlanner<L, S = FairGreedySelector, Q = NearestNeighbourSequencer> {
    lookup: L,
    selector: S,
    sequencer: Q,
    config: PlannerConfig,
}

impl<L> ItineraryPlanner<L>
where
    L: AirportLookup,
{
    /// Construct a planner with default configuration and strategies.
    pub fn new(lookup: L) -> Self {
        Self::with_config(lookup, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration and default
    /// strategies.
    pub const fn with_config(lookup: L, config: PlannerConfig) -> Self {
        let selector = FairGreedySelector::new(config.max_fairness_passes);
        Self::with_strategies(lookup, selector, NearestNeighbourSequencer, config)
    }
}

impl<L, S, Q> ItineraryPlanner<L, S, Q>
where
    L: AirportLookup,
    S: StopSelector,
    Q: StopSequencer,
{
    /// Construct a planner with custom selection and ordering strategies.
    pub const fn with_strategies(lookup: L, selector: S, sequencer: Q, config: PlannerConfig) -> Self {
        Self {
            lookup,
            selector,
            sequencer,
            config,
        }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Build and score the candidate seeded with `seed + index`.
    fn plan_candidate(
        &self,
        request: &TripRequest,
        budget_hours: f64,
        index: usize,
        cancel: &CancelToken,
    ) -> Result<Plan, PlanError> {
        cancel.check()?;
        let seed = self.config.seed.wrapping_add(index as u64);
        let selected = self.selector.select(request, budget_hours, seed);
        if selected.is_empty() {
            return Err(PlanError::NoFeasibleItinerary { budget_hours });
        }

        cancel.check()?;
        let ordered: Vec<DesiredStop> =
            self.sequencer
                .sequence(&request.departure, selected, request.return_to_departure);

        cancel.check()?;
        let builder =
            ItineraryBuilder::new(&self.config.transport, &self.config.speeds, &self.lookup);
        let built = builder.build(request, &ordered)?;

        cancel.check()?;
        let trimmed = trim_to_deadline(built.itinerary, request.end)?;
        let mut warnings = built.warnings;
        warnings.extend(trimmed.warning);

        let mut itinerary = trimmed.itinerary;
        itinerary.id = format!("{}#{index}", request.id);
        itinerary.satisfaction = traveler_satisfaction(request, &itinerary);
        let score = plan_score(&itinerary);
        log::debug!(
            "candidate {index} (seed {seed}): {} stops, combined score {:.3}",
            itinerary.visited().len(),
            score.combined
        );
        Ok(Plan {
            itinerary,
            score,
            warnings,
        })
    }
}

impl<L, S, Q> TripOptimizer for ItineraryPlanner<L, S, Q>
where
    L: AirportLookup,
    S: StopSelector,
    Q: StopSequencer,
{
    fn optimize_with_cancel(
        &self,
        request: &TripRequest,
        cancel: &CancelToken,
    ) -> Result<Plan, PlanError> {
        cancel.check()?;
        request.validate()?;

        let budget_hours = time_budget_hours(request, self.config.budget_slack);
        log::debug!(
            "planning {} with a {budget_hours:.1}h budget over {} candidates",
            request.id,
            self.config.candidates
        );

        let candidates = (0..self.config.candidates.get())
            .into_par_iter()
            .map(|index| self.plan_candidate(request, budget_hours, index, cancel))
            .collect::<Result<Vec<Plan>, PlanError>>()?;

        cancel.check()?;
        let best = pick_best(candidates).ok_or(PlanError::NoFeasibleItinerary { budget_hours })?;
        log::info!(
            "chose {} visiting {} stops (combined score {:.3}, {} warnings)",
            best.itinerary.id,
            best.itinerary.visited().len(),
            best.score.combined,
            best.warnings.len()
        );
        Ok(best)
    }
}
