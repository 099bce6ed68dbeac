//! Per-traveler satisfaction and candidate ranking.
//!
//! Satisfaction blends how many of a traveler's requested stops were kept
//! with how important the kept ones were to them. Candidates are ranked by a
//! combination of how evenly satisfaction is spread (equality) and how
//! little travel the itinerary needs (efficiency).

use std::collections::BTreeMap;

use itinera_core::{Itinerary, MAX_PRIORITY, Plan, PlanScore, TravelerId, TripRequest};

/// Weight of the inclusion ratio in satisfaction.
const INCLUSION_WEIGHT: f64 = 0.4;
/// Weight of the mean normalised priority in satisfaction.
const PRIORITY_WEIGHT: f64 = 0.6;
/// Population variance at which the spread penalty saturates.
const VARIANCE_CEILING: f64 = 0.25;
/// Distance at which the distance penalty saturates, in kilometres.
const DISTANCE_CEILING_KM: f64 = 10_000.0;
/// Travel time at which the duration penalty saturates, in hours.
const DURATION_CEILING_HOURS: f64 = 100.0;
/// Weight of equality in the combined score.
const EQUALITY_WEIGHT: f64 = 0.7;

/// Satisfaction in `0.0..=1.0` for every traveler in `request`.
///
/// Travelers who requested nothing score zero.
#[must_use]
pub fn traveler_satisfaction(
    request: &TripRequest,
    itinerary: &Itinerary,
) -> BTreeMap<TravelerId, f64> {
    let visited = itinerary.visited();
    request
        .travelers
        .iter()
        .map(|traveler| {
            let mut requested = 0_u32;
            let mut priorities = Vec::new();
            for stop in request
                .stops
                .iter()
                .filter(|stop| stop.is_requested_by(&traveler.id))
            {
                requested += 1;
                if visited.contains(&stop.id) {
                    priorities.push(stop.priority);
                }
            }
            (traveler.id.clone(), satisfaction(requested, &priorities))
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "satisfaction is a weighted ratio of counts and priorities"
)]
fn satisfaction(requested: u32, included_priorities: &[u8]) -> f64 {
    if requested == 0 || included_priorities.is_empty() {
        return 0.0;
    }
    let included = included_priorities.len() as f64;
    let inclusion = included / f64::from(requested);
    let mean_priority = included_priorities
        .iter()
        .map(|&priority| f64::from(priority) / f64::from(MAX_PRIORITY))
        .sum::<f64>()
        / included;
    INCLUSION_WEIGHT * inclusion + PRIORITY_WEIGHT * mean_priority
}

/// How evenly `values` are spread: half the minimum, half one minus the
/// normalised population variance.
///
/// An empty set counts as perfectly equal.
///
/// # Examples
/// ```
/// use itinera_planner::equality_score;
///
/// assert!((equality_score(&[0.8, 0.8]) - 0.9).abs() < 1e-12);
/// assert!(equality_score(&[1.0, 0.0]) < equality_score(&[0.5, 0.5]));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "equality combines the minimum with a variance penalty"
)]
pub fn equality_score(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 1.0;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count;
    let minimum = values.iter().copied().fold(f64::INFINITY, f64::min);
    0.5 * minimum + 0.5 * (1.0 - (variance / VARIANCE_CEILING).min(1.0))
}

/// How light the itinerary's travel is, from total distance and total leg
/// time.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "efficiency blends saturating distance and time penalties"
)]
pub fn efficiency_score(itinerary: &Itinerary) -> f64 {
    let distance = (itinerary.total_distance_km() / DISTANCE_CEILING_KM).min(1.0);
    let duration = (itinerary.total_travel_hours() / DURATION_CEILING_HOURS).min(1.0);
    0.6 * (1.0 - distance) + 0.4 * (1.0 - duration)
}

/// Score an itinerary whose satisfaction map is already filled in.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "weighted blend of scores")]
pub fn plan_score(itinerary: &Itinerary) -> PlanScore {
    let values: Vec<f64> = itinerary.satisfaction.values().copied().collect();
    let equality = equality_score(&values);
    let efficiency = efficiency_score(itinerary);
    PlanScore {
        equality,
        efficiency,
        combined: EQUALITY_WEIGHT * equality + (1.0 - EQUALITY_WEIGHT) * efficiency,
    }
}

/// The plan with the highest combined score. Ties keep the earliest plan.
#[must_use]
pub fn pick_best<I>(plans: I) -> Option<Plan>
where
    I: IntoIterator<Item = Plan>,
{
    plans.into_iter().fold(None, |best, plan| match best {
        Some(current) if current.score.combined >= plan.score.combined => Some(current),
        _ => Some(plan),
    })
}
