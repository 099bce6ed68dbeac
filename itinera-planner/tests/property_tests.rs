//! Property-based tests for the planner.
//!
//! # Invariants tested
//!
//! - **Budget compliance:** selected stays never exceed the time budget.
//! - **Permutation:** sequencing reorders without adding or losing stops.
//! - **Well-formed itineraries:** departure first, chronological arrivals,
//!   one leg per consecutive stop pair, scores within range, with or without
//!   an end date. The only permitted failure is an unaffordable request.
//! - **Determinism:** equal inputs and seeds give equal plans.
//! - **Trim bounds:** trimming never lengthens a stay and never cuts a long
//!   stay below one day.

mod proptest_support;

use std::collections::BTreeSet;

use itinera_core::test_support::{NoAirports, hours_after_start};
use itinera_core::{PlanError, StopKind, StopSelector, StopSequencer, TripOptimizer};
use itinera_planner::{
    FairGreedySelector, ItineraryPlanner, NearestNeighbourSequencer, PlannerConfig,
    time_budget_hours, trim_to_deadline,
};
use jiff::SignedDuration;
use proptest::prelude::*;

use proptest_support::request_strategy;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the selector never spends more stay time than it has.
    #[test]
    fn selection_respects_budget(
        request in request_strategy(8),
        budget in 0_u32..=200_u32,
        seed in any::<u64>(),
    ) {
        let budget_hours = f64::from(budget);
        let selected = FairGreedySelector::default().select(&request, budget_hours, seed);
        let used: f64 = selected.iter().map(|stop| stop.stay_hours).sum();
        prop_assert!(used <= budget_hours, "used {used}h of {budget_hours}h");
    }

    /// Property: nearest-neighbour ordering is a permutation of its input.
    #[test]
    fn sequencing_is_a_permutation(request in request_strategy(8)) {
        let ordered = NearestNeighbourSequencer.sequence(
            &request.departure,
            request.stops.clone(),
            request.return_to_departure,
        );
        prop_assert_eq!(ordered.len(), request.stops.len());
        let before: BTreeSet<_> = request.stops.iter().map(|stop| stop.id.clone()).collect();
        let after: BTreeSet<_> = ordered.iter().map(|stop| stop.id.clone()).collect();
        prop_assert_eq!(before, after);
    }

    /// Property: any planned itinerary is well formed.
    #[test]
    fn planned_itineraries_are_well_formed(request in request_strategy(6)) {
        let budget_hours = time_budget_hours(&request, 1.5);
        let affordable = request.stops.iter().any(|stop| stop.stay_hours <= budget_hours);
        let plan = match ItineraryPlanner::new(NoAirports).optimize(&request) {
            Ok(plan) => plan,
            Err(PlanError::NoFeasibleItinerary { .. }) if !affordable => return Ok(()),
            Err(err) => return Err(TestCaseError::fail(err.to_string())),
        };
        let itinerary = &plan.itinerary;

        prop_assert_eq!(
            itinerary.first_stop().map(|stop| &stop.kind),
            Some(&StopKind::Departure)
        );
        prop_assert!(itinerary.is_chronological());
        prop_assert!(itinerary.legs_reference_stops());
        prop_assert_eq!(itinerary.legs.len() + 1, itinerary.stops.len());
        prop_assert!(itinerary.stops.iter().all(|stop| stop.departure >= stop.arrival));
        prop_assert_eq!(
            matches!(itinerary.last_stop().map(|stop| &stop.kind), Some(StopKind::Return)),
            request.return_to_departure
        );
        for score in [plan.score.equality, plan.score.efficiency, plan.score.combined] {
            prop_assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        }
        for value in itinerary.satisfaction.values() {
            prop_assert!((0.0..=1.0).contains(value));
        }
    }

    /// Property: planning is deterministic for a fixed seed.
    #[test]
    fn planning_is_deterministic(request in request_strategy(6), seed in any::<u64>()) {
        let planner = ItineraryPlanner::with_config(
            NoAirports,
            PlannerConfig::default().with_seed(seed),
        );
        prop_assert_eq!(planner.optimize(&request), planner.optimize(&request));
    }

    /// Property: trimming only ever shortens stays, and long stays keep a day.
    #[test]
    fn trimming_bounds_stays(request in request_strategy(6), deadline_hours in 0_i64..=240_i64) {
        let Ok(plan) = ItineraryPlanner::new(NoAirports).optimize(&request) else {
            return Ok(());
        };
        let original = plan.itinerary;
        let trimmed = trim_to_deadline(original.clone(), Some(hours_after_start(deadline_hours)))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert!(trimmed.itinerary.is_chronological());
        for (before, after) in original.stops.iter().zip(&trimmed.itinerary.stops) {
            prop_assert!(after.stay() <= before.stay());
            if before.stay() >= SignedDuration::from_hours(48) {
                prop_assert!(after.stay() >= SignedDuration::from_hours(24));
            }
        }
    }
}
