//! Fair greedy stop selection under a time budget.
//!
//! Travelers take turns picking their most important affordable stop. Turn
//! order is shuffled each pass with a seeded `ChaCha8Rng`, so the same seed
//! always yields the same selection. Once no traveler can add anything, a
//! backfill pass spends leftover budget on stops that help whoever is worst
//! off.

use std::cmp::Reverse;
use std::collections::HashMap;

use itinera_core::{DesiredStop, StopSelector, TravelerId, TripRequest};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Hours available for stays.
///
/// With an end date the budget is the span between start and end. Without
/// one it is the total requested stay multiplied by `slack`, rounded up to a
/// whole hour.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinera_core::{DesiredStop, Place, Traveler, TripRequest};
/// use itinera_planner::time_budget_hours;
/// use jiff::Timestamp;
///
/// let home = Place::new("Home", Coord { x: 0.0, y: 0.0 });
/// let request = TripRequest {
///     id: "trip".into(),
///     name: None,
///     travelers: vec![Traveler::new("ana", "Ana")],
///     departure: home.clone(),
///     start: Timestamp::UNIX_EPOCH,
///     end: None,
///     return_to_departure: false,
///     stops: vec![DesiredStop::new("a", home).requested_by("ana").with_stay_hours(10.0)],
/// };
/// assert_eq!(time_budget_hours(&request, 1.5), 15.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "budget scales requested stays")]
pub fn time_budget_hours(request: &TripRequest, slack: f64) -> f64 {
    request.end.map_or_else(
        || (request.total_stay_hours() * slack).ceil(),
        |end| end.duration_since(request.start).as_secs_f64() / 3600.0,
    )
}

/// Default [`StopSelector`]: fair round-robin followed by backfill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FairGreedySelector {
    max_passes: usize,
}

impl Default for FairGreedySelector {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FairGreedySelector {
    /// Create a selector running at most `max_passes` round-robin passes.
    #[must_use]
    pub const fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }
}

impl StopSelector for FairGreedySelector {
    fn select(&self, request: &TripRequest, budget_hours: f64, seed: u64) -> Vec<DesiredStop> {
        let mut state = Selection::new(request, budget_hours);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut order: Vec<&TravelerId> = request.travelers.iter().map(|t| &t.id).collect();

        for pass in 0..self.max_passes {
            order.shuffle(&mut rng);
            let mut added = false;
            for traveler in &order {
                if let Some(index) = state.best_for(traveler) {
                    state.take(index);
                    added = true;
                }
            }
            if !added {
                log::debug!("round-robin settled after {pass} passes");
                break;
            }
        }

        while let Some(index) = state.best_backfill() {
            state.take(index);
        }

        log::debug!(
            "selected {} of {} stops using {:.1}h of {:.1}h",
            state.chosen.iter().filter(|&&c| c).count(),
            request.stops.len(),
            state.used_hours,
            budget_hours
        );
        state.into_stops()
    }
}

struct Selection<'a> {
    stops: &'a [DesiredStop],
    chosen: Vec<bool>,
    counts: HashMap<&'a TravelerId, usize>,
    used_hours: f64,
    budget_hours: f64,
}

impl<'a> Selection<'a> {
    fn new(request: &'a TripRequest, budget_hours: f64) -> Self {
        Self {
            stops: &request.stops,
            chosen: vec![false; request.stops.len()],
            counts: request.travelers.iter().map(|t| (&t.id, 0)).collect(),
            used_hours: 0.0,
            budget_hours,
        }
    }

    #[expect(clippy::float_arithmetic, reason = "budget accounting")]
    fn affordable(&self) -> impl Iterator<Item = (usize, &'a DesiredStop)> + '_ {
        self.stops.iter().enumerate().filter(|(index, stop)| {
            !self.chosen.get(*index).copied().unwrap_or(true)
                && self.used_hours + stop.stay_hours <= self.budget_hours
        })
    }

    fn best_for(&self, traveler: &TravelerId) -> Option<usize> {
        self.affordable()
            .filter(|(_, stop)| stop.is_requested_by(traveler))
            .min_by_key(|(index, stop)| (Reverse(stop.priority), *index))
            .map(|(index, _)| index)
    }

    fn best_backfill(&self) -> Option<usize> {
        self.affordable()
            .min_by_key(|(index, stop)| (self.neediest(stop), Reverse(stop.priority), *index))
            .map(|(index, _)| index)
    }

    fn neediest(&self, stop: &DesiredStop) -> usize {
        stop.requesters
            .iter()
            .map(|id| self.counts.get(id).copied().unwrap_or(0))
            .min()
            .unwrap_or(usize::MAX)
    }

    #[expect(clippy::float_arithmetic, reason = "budget accounting")]
    fn take(&mut self, index: usize) {
        let Some(stop) = self.stops.get(index) else {
            return;
        };
        if let Some(flag) = self.chosen.get_mut(index) {
            *flag = true;
        }
        self.used_hours += stop.stay_hours;
        for requester in &stop.requesters {
            if let Some(count) = self.counts.get_mut(requester) {
                *count += 1;
            }
        }
    }

    fn into_stops(self) -> Vec<DesiredStop> {
        self.stops
            .iter()
            .zip(self.chosen)
            .filter_map(|(stop, chosen)| chosen.then(|| stop.clone()))
            .collect()
    }
}
