//! Behavioural tests for `ItineraryPlanner` using rstest-bdd.

use std::cell::RefCell;

use itinera_core::test_support::{
    FixedAirports, NoAirports, OfflineAirports, hours_after_start, place, request, stop,
};
use itinera_core::{
    AirportLookup, AirportLookupError, GeoPoint, ItineraryStop, Place, Plan, PlanError,
    PlanWarning, StopKind, TransportMode, TravelerId, TripOptimizer, TripRequest,
    TripRequestValidationError,
};
use itinera_planner::ItineraryPlanner;
use jiff::SignedDuration;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Clone, Default)]
enum LookupChoice {
    #[default]
    Empty,
    Catalogue(FixedAirports),
    Offline,
}

impl AirportLookup for LookupChoice {
    fn nearest_airport(&self, point: GeoPoint) -> Result<Option<Place>, AirportLookupError> {
        match self {
            Self::Empty => NoAirports.nearest_airport(point),
            Self::Catalogue(airports) => airports.nearest_airport(point),
            Self::Offline => OfflineAirports.nearest_airport(point),
        }
    }
}

#[derive(Debug, Default)]
struct PlannerWorld {
    request: RefCell<Option<TripRequest>>,
    lookup: RefCell<LookupChoice>,
    outcome: RefCell<Option<Result<Plan, PlanError>>>,
}

impl PlannerWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<Plan, PlanError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_plan(&self) -> Plan {
        self.expect_outcome().expect("expected planning to succeed")
    }

    fn edit_request(&self, edit: impl FnOnce(&mut TripRequest)) {
        if let Some(trip) = self.request.borrow_mut().as_mut() {
            edit(trip);
        }
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

#[given("a traveler in Tokyo who wants two days in London")]
fn given_tokyo_to_london(world: &PlannerWorld) {
    let trip = request(
        place("Tokyo", 139.69, 35.69),
        &["ana"],
        vec![stop("london", place("London", -0.13, 51.51), &["ana"], 5, 48.0)],
    );
    world.request.replace(Some(trip));
}

#[given("an airport catalogue covering Tokyo and London")]
fn given_airport_catalogue(world: &PlannerWorld) {
    world
        .lookup
        .replace(LookupChoice::Catalogue(FixedAirports::with_airports([
            place("Haneda Airport", 139.78, 35.55),
            place("Heathrow Airport", -0.45, 51.47),
        ])));
}

#[given("an airport service that is offline")]
fn given_offline_service(world: &PlannerWorld) {
    world.lookup.replace(LookupChoice::Offline);
}

#[given("two travelers each requesting three day-long stops near home")]
fn given_two_travelers(world: &PlannerWorld) {
    let trip = request(
        place("Home", 0.0, 0.0),
        &["ana", "ben"],
        vec![
            stop("a1", place("North 1", 0.0, 0.1), &["ana"], 5, 24.0),
            stop("a2", place("North 2", 0.0, 0.2), &["ana"], 4, 24.0),
            stop("a3", place("North 3", 0.0, 0.3), &["ana"], 3, 24.0),
            stop("b1", place("East 1", 0.1, 0.0), &["ben"], 5, 24.0),
            stop("b2", place("East 2", 0.2, 0.0), &["ben"], 4, 24.0),
            stop("b3", place("East 3", 0.3, 0.0), &["ben"], 3, 24.0),
        ],
    );
    world.request.replace(Some(trip));
}

#[given("the trip lasts four days")]
fn given_four_days(world: &PlannerWorld) {
    world.edit_request(|trip| trip.end = Some(hours_after_start(96)));
}

#[given("a trip request without travelers")]
fn given_no_travelers(world: &PlannerWorld) {
    let home = place("Home", 0.0, 0.0);
    let mut trip = request(home.clone(), &[], vec![stop("a", home, &["ana"], 3, 1.0)]);
    trip.travelers.clear();
    world.request.replace(Some(trip));
}

#[given("a trip request whose only stop outlasts a two-day trip")]
fn given_stop_outlasting_trip(world: &PlannerWorld) {
    let home = place("Home", 0.0, 0.0);
    let mut trip = request(
        home,
        &["ana"],
        vec![stop("retreat", place("Retreat", 0.0, 0.5), &["ana"], 5, 120.0)],
    );
    trip.end = Some(hours_after_start(48));
    world.request.replace(Some(trip));
}

#[given("a traveler at the origin who wants a day one kilometre away")]
fn given_local_trip(world: &PlannerWorld) {
    let trip = request(
        place("Origin", 0.0, 0.0),
        &["ana"],
        vec![stop("cafe", place("Cafe", 0.0, 0.01), &["ana"], 5, 24.0)],
    );
    world.request.replace(Some(trip));
}

#[given("three travelers who all want the same single stop")]
fn given_shared_stop(world: &PlannerWorld) {
    let travelers = ["ana", "ben", "caz"];
    let trip = request(
        place("Home", 0.0, 0.0),
        &travelers,
        vec![stop("lake", place("Lake", 0.2, 0.2), &travelers, 5, 24.0)],
    );
    world.request.replace(Some(trip));
}

#[when("the trip is planned")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_trip_planned(world: &PlannerWorld) {
    let trip = world
        .request
        .borrow()
        .clone()
        .expect("a request should be set up first");
    let planner = ItineraryPlanner::new(world.lookup.borrow().clone());
    world.outcome.replace(Some(planner.optimize(&trip)));
}

#[then("the itinerary contains an air leg between airports")]
fn then_air_leg(world: &PlannerWorld) {
    let plan = world.expect_plan();
    let itinerary = &plan.itinerary;
    let air_leg = itinerary
        .legs
        .iter()
        .find(|leg| leg.mode == TransportMode::Air);
    assert!(air_leg.is_some(), "no air leg in {:?}", itinerary.legs);
    let airport_stops = itinerary
        .stops
        .iter()
        .filter(|stop| stop.kind == StopKind::Airport)
        .count();
    assert_eq!(airport_stops, 2);
}

#[then("the plan carries no warnings")]
fn then_no_warnings(world: &PlannerWorld) {
    assert!(world.expect_plan().warnings.is_empty());
}

#[then("every leg travels over land")]
fn then_all_land(world: &PlannerWorld) {
    let plan = world.expect_plan();
    assert!(
        plan.itinerary
            .legs
            .iter()
            .all(|leg| leg.mode == TransportMode::Land)
    );
}

#[then("the plan warns that the airport lookup was unavailable")]
fn then_lookup_warning(world: &PlannerWorld) {
    let plan = world.expect_plan();
    assert!(
        plan.warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::AirportLookupUnavailable { .. }))
    );
}

#[then("each traveler has at least one requested stop")]
fn then_each_traveler_served(world: &PlannerWorld) {
    let plan = world.expect_plan();
    for traveler in ["ana", "ben"] {
        let id = TravelerId::new(traveler);
        let served = plan
            .itinerary
            .stops
            .iter()
            .any(|stop| stop.requesters.contains(&id));
        assert!(served, "{traveler} has no stop");
    }
}

#[then("the itinerary is the departure and one day-long stay")]
fn then_departure_and_stay(world: &PlannerWorld) {
    let plan = world.expect_plan();
    let kinds: Vec<_> = plan.itinerary.stops.iter().map(|stop| &stop.kind).collect();
    assert_eq!(kinds.len(), 2);
    assert_eq!(kinds.first(), Some(&&StopKind::Departure));
    let stay = plan.itinerary.last_stop().map(ItineraryStop::stay);
    assert_eq!(stay, Some(SignedDuration::from_hours(24)));
    assert_eq!(plan.itinerary.legs.len(), 1);
}

#[then("every traveler is fully satisfied")]
fn then_fully_satisfied(world: &PlannerWorld) {
    let plan = world.expect_plan();
    assert!(!plan.itinerary.satisfaction.is_empty());
    for (traveler, score) in &plan.itinerary.satisfaction {
        assert!((score - 1.0).abs() < 1e-9, "{traveler:?} scored {score}");
    }
}

#[then("the equality score is perfect")]
fn then_perfect_equality(world: &PlannerWorld) {
    let plan = world.expect_plan();
    assert!((plan.score.equality - 1.0).abs() < 1e-9);
}

#[then("planning fails because the traveler list is empty")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_empty_travelers(world: &PlannerWorld) {
    let err = world.expect_outcome().expect_err("expected a failure");
    assert_eq!(
        err,
        PlanError::Invalid(TripRequestValidationError::EmptyTravelerList)
    );
}

#[then("planning fails because no stop fits the budget")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_infeasible(world: &PlannerWorld) {
    let err = world.expect_outcome().expect_err("expected a failure");
    assert!(matches!(err, PlanError::NoFeasibleItinerary { .. }));
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn long_haul_flight(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn fair_budget_sharing(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn offline_airport_service(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 3)]
fn missing_travelers(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 4)]
fn infeasible_stop(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 5)]
fn local_trip(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 6)]
fn shared_only_stop(world: PlannerWorld) {
    let _ = world;
}
