//! Proptest strategies for planner property-based tests.
//!
//! Generated requests always pass validation: every stop is requested by at
//! least one known traveler and priorities stay within range.

use geo::Coord;
use itinera_core::test_support::{hours_after_start, start_instant};
use itinera_core::{DesiredStop, DesiredStopId, Place, Traveler, TravelerId, TripRequest};
use proptest::prelude::*;

/// Traveler identifiers used by generated requests.
pub const TRAVELERS: [&str; 3] = ["ana", "ben", "caz"];

/// Strategy for a single desired stop; its id is assigned by the caller.
fn stop_strategy(traveler_count: usize) -> impl Strategy<Value = DesiredStop> {
    (
        -2.0_f64..2.0_f64,
        -2.0_f64..2.0_f64,
        proptest::sample::subsequence(TRAVELERS[..traveler_count].to_vec(), 1..=traveler_count),
        1_u8..=5_u8,
        0_u32..=96_u32,
    )
        .prop_map(|(x, y, requesters, priority, stay)| DesiredStop {
            id: "pending".into(),
            place: Place::new("Stop", Coord { x, y }),
            requesters: requesters.into_iter().map(TravelerId::new).collect(),
            priority,
            stay_hours: f64::from(stay),
        })
}

/// Strategy for a valid request with one to three travelers and up to
/// `max_stops` stops within a few hundred kilometres of the origin. About
/// half the requests carry an end date up to ten days after the start.
pub fn request_strategy(max_stops: usize) -> impl Strategy<Value = TripRequest> {
    (
        1_usize..=TRAVELERS.len(),
        any::<bool>(),
        proptest::option::of(0_i64..=240_i64),
    )
        .prop_flat_map(move |(travelers, round_trip, end_hours)| {
            proptest::collection::vec(stop_strategy(travelers), 1..=max_stops).prop_map(
                move |stops| TripRequest {
                    id: "prop".into(),
                    name: None,
                    travelers: TRAVELERS
                        .iter()
                        .take(travelers)
                        .map(|&id| Traveler::new(id, id))
                        .collect(),
                    departure: Place::new("Origin", Coord { x: 0.0, y: 0.0 }),
                    start: start_instant(),
                    end: end_hours.map(hours_after_start),
                    return_to_departure: round_trip,
                    stops: stops
                        .into_iter()
                        .enumerate()
                        .map(|(idx, stop)| DesiredStop {
                            id: DesiredStopId::new(format!("s{idx}")),
                            place: Place::new(format!("Stop {idx}"), stop.place.location),
                            ..stop
                        })
                        .collect(),
                },
            )
        })
}
