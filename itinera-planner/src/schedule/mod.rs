//! Turning an ordered stop sequence into a dated itinerary.
//!
//! Each hop between consecutive places is classified as land or air. Flying
//! hops are routed through the nearest airports, which become zero-stay
//! waypoint stops. The clock advances in whole days per travelled leg and by
//! the exact requested stay at each visit.

use std::collections::{BTreeMap, BTreeSet};

use itinera_core::{
    AirportLookup, AirportLookupError, DesiredStop, Itinerary, ItineraryStop, ItineraryStopId,
    Leg, LegId, Place, PlanError, PlanWarning, StopKind, TransportMode, TravelerId, TripRequest,
    haversine_km,
};
use jiff::{SignedDuration, Timestamp};
use rayon::prelude::*;

use crate::{SpeedModel, TransportPolicy};

/// Longest single travel leg the clock accepts, in days.
const MAX_TRAVEL_DAYS: f64 = 100_000.0;

/// An itinerary together with the degradations met while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltItinerary {
    /// Dated stops and legs. Identifier and satisfaction are left empty.
    pub itinerary: Itinerary,
    /// Airport lookups that fell back to land travel.
    pub warnings: Vec<PlanWarning>,
}

/// Schedules sequences of stops using a transport policy, a speed model and
/// an airport lookup.
#[derive(Debug, Clone, Copy)]
pub struct ItineraryBuilder<'a, L> {
    transport: &'a TransportPolicy,
    speeds: &'a SpeedModel,
    lookup: &'a L,
}

impl<'a, L> ItineraryBuilder<'a, L>
where
    L: AirportLookup,
{
    /// Create a builder over borrowed collaborators.
    pub const fn new(transport: &'a TransportPolicy, speeds: &'a SpeedModel, lookup: &'a L) -> Self {
        Self {
            transport,
            speeds,
            lookup,
        }
    }

    /// Schedule `sequence` starting at the request's departure and start
    /// instant, returning to the departure when the request asks for it.
    ///
    /// # Errors
    /// Returns [`PlanError::ScheduleOverflow`] when dates leave the
    /// supported range.
    pub fn build(
        &self,
        request: &TripRequest,
        sequence: &[DesiredStop],
    ) -> Result<BuiltItinerary, PlanError> {
        let targets = targets(request, sequence);
        let origins: Vec<&Place> = std::iter::once(&request.departure)
            .chain(targets.iter().map(|target| target.place))
            .collect();
        let hops: Vec<Hop<'_>> = origins
            .iter()
            .zip(&targets)
            .map(|(from, target)| Hop::new(from, target.place, self.transport))
            .collect();
        let airports = self.prefetch_airports(&hops);

        let mut warnings = Vec::new();
        let mut draft = Draft::new(request.departure.clone(), request.start);
        let mut clock = Clock(request.start);
        for (hop, target) in hops.iter().zip(&targets) {
            let (route, warning) = hop.route(&airports);
            if let Some(issue) = warning {
                warnings.push(issue);
            }
            for (waypoint, mode) in route.transfers {
                clock = draft.travel(
                    clock,
                    Arrival {
                        kind: StopKind::Airport,
                        place: waypoint,
                        stay_hours: 0.0,
                        requesters: BTreeSet::new(),
                    },
                    mode,
                    self.speeds,
                )?;
            }
            clock = draft.travel(
                clock,
                Arrival {
                    kind: target.kind.clone(),
                    place: target.place.clone(),
                    stay_hours: target.stay_hours,
                    requesters: target.requesters.clone(),
                },
                route.final_mode,
                self.speeds,
            )?;
        }

        Ok(BuiltItinerary {
            itinerary: Itinerary {
                id: String::new(),
                stops: draft.stops,
                legs: draft.legs,
                satisfaction: BTreeMap::new(),
            },
            warnings,
        })
    }

    /// Look up airports for every non-airport endpoint of a flying hop.
    /// Lookups are independent, so they run in parallel.
    fn prefetch_airports<'p>(&self, hops: &[Hop<'p>]) -> AirportCache<'p> {
        let mut wanted: Vec<&'p Place> = Vec::new();
        for hop in hops.iter().filter(|hop| hop.mode == TransportMode::Air) {
            for place in [hop.from, hop.to] {
                if !place.is_airport && !wanted.contains(&place) {
                    wanted.push(place);
                }
            }
        }
        if !wanted.is_empty() {
            log::debug!("looking up airports for {} places", wanted.len());
        }
        let entries = wanted
            .par_iter()
            .map(|&place| (place, self.lookup.nearest_airport(place.location)))
            .collect();
        AirportCache { entries }
    }
}

struct Target<'a> {
    kind: StopKind,
    place: &'a Place,
    stay_hours: f64,
    requesters: BTreeSet<TravelerId>,
}

fn targets<'a>(request: &'a TripRequest, sequence: &'a [DesiredStop]) -> Vec<Target<'a>> {
    let visits = sequence.iter().map(|stop| Target {
        kind: StopKind::Visit(stop.id.clone()),
        place: &stop.place,
        stay_hours: stop.stay_hours,
        requesters: stop.requesters.clone(),
    });
    let home = request.return_to_departure.then(|| Target {
        kind: StopKind::Return,
        place: &request.departure,
        stay_hours: 0.0,
        requesters: BTreeSet::new(),
    });
    visits.chain(home).collect()
}

struct Hop<'a> {
    from: &'a Place,
    to: &'a Place,
    mode: TransportMode,
}

impl<'a> Hop<'a> {
    fn new(from: &'a Place, to: &'a Place, transport: &TransportPolicy) -> Self {
        Self {
            from,
            to,
            mode: transport.mode_between(from, to),
        }
    }

    fn route(&self, airports: &AirportCache<'_>) -> (Route, Option<PlanWarning>) {
        if self.mode == TransportMode::Land {
            return (Route::direct(), None);
        }
        match (airports.resolve(self.from), airports.resolve(self.to)) {
            (Ok(Some(origin)), Ok(Some(destination))) if origin == destination => {
                log::debug!(
                    "{} and {} share {}; travelling over land",
                    self.from.name,
                    self.to.name,
                    origin.name
                );
                (Route::direct(), None)
            }
            (Ok(Some(origin)), Ok(Some(destination))) => {
                (Route::flight(self.from, origin, self.to, destination), None)
            }
            (Err(err), _) | (_, Err(err)) => (Route::direct(), Some(self.fallback(err.to_string()))),
            (Ok(None), _) => {
                let reason = format!("no airport found near {}", self.from.name);
                (Route::direct(), Some(self.fallback(reason)))
            }
            (_, Ok(None)) => {
                let reason = format!("no airport found near {}", self.to.name);
                (Route::direct(), Some(self.fallback(reason)))
            }
        }
    }

    fn fallback(&self, reason: String) -> PlanWarning {
        log::warn!(
            "flying {} -> {} is not possible ({reason}); travelling over land",
            self.from.name,
            self.to.name
        );
        PlanWarning::AirportLookupUnavailable {
            from: self.from.name.clone(),
            to: self.to.name.clone(),
            reason,
        }
    }
}

/// Intermediate airport waypoints and the mode of the final segment.
struct Route {
    transfers: Vec<(Place, TransportMode)>,
    final_mode: TransportMode,
}

impl Route {
    const fn direct() -> Self {
        Self {
            transfers: Vec::new(),
            final_mode: TransportMode::Land,
        }
    }

    fn flight(from: &Place, origin: Place, to: &Place, destination: Place) -> Self {
        let mut transfers = Vec::with_capacity(2);
        if origin != *from {
            transfers.push((origin, TransportMode::Land));
        }
        if destination == *to {
            return Self {
                transfers,
                final_mode: TransportMode::Air,
            };
        }
        transfers.push((destination, TransportMode::Air));
        Self {
            transfers,
            final_mode: TransportMode::Land,
        }
    }
}

struct AirportCache<'a> {
    entries: Vec<(&'a Place, Result<Option<Place>, AirportLookupError>)>,
}

impl AirportCache<'_> {
    fn resolve(&self, place: &Place) -> Result<Option<Place>, AirportLookupError> {
        if place.is_airport {
            return Ok(Some(place.clone()));
        }
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == place)
            .map_or(Ok(None), |(_, found)| found.clone())
    }
}

/// Point in time the schedule has reached.
#[derive(Debug, Clone, Copy)]
struct Clock(Timestamp);

impl Clock {
    /// Advance by the travel time rounded up to whole days.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "travel hours are converted to a bounded whole-day count"
    )]
    fn after_travel(self, hours: f64) -> Result<Self, PlanError> {
        let days = (hours / 24.0).ceil();
        if !(0.0..=MAX_TRAVEL_DAYS).contains(&days) {
            return Err(PlanError::ScheduleOverflow);
        }
        let whole_days = days as i64;
        self.advance(SignedDuration::from_hours(whole_days * 24))
    }

    /// Advance by an exact stay.
    #[expect(clippy::float_arithmetic, reason = "stay hours become seconds")]
    fn after_stay(self, hours: f64) -> Result<Self, PlanError> {
        let stay = SignedDuration::try_from_secs_f64(hours * 3600.0)
            .map_err(|_| PlanError::ScheduleOverflow)?;
        self.advance(stay)
    }

    fn advance(self, by: SignedDuration) -> Result<Self, PlanError> {
        self.0
            .checked_add(by)
            .map(Self)
            .map_err(|_| PlanError::ScheduleOverflow)
    }
}

struct Arrival {
    kind: StopKind,
    place: Place,
    stay_hours: f64,
    requesters: BTreeSet<TravelerId>,
}

/// Stops and legs accumulated so far.
struct Draft {
    stops: Vec<ItineraryStop>,
    legs: Vec<Leg>,
}

impl Draft {
    fn new(departure: Place, start: Timestamp) -> Self {
        Self {
            stops: vec![ItineraryStop {
                id: ItineraryStopId(0),
                kind: StopKind::Departure,
                place: departure,
                arrival: start,
                departure: start,
                requesters: BTreeSet::new(),
            }],
            legs: Vec::new(),
        }
    }

    /// Travel from the latest stop to `arrival`, returning the clock at the
    /// moment travelers leave it again.
    fn travel(
        &mut self,
        clock: Clock,
        arrival: Arrival,
        mode: TransportMode,
        speeds: &SpeedModel,
    ) -> Result<Clock, PlanError> {
        let Some(previous) = self.stops.last() else {
            return Err(PlanError::ScheduleOverflow);
        };
        let from = previous.id;
        let distance_km = haversine_km(previous.place.location, arrival.place.location);
        let duration_hours = speeds.estimate_hours(distance_km, mode);
        log::debug!(
            "{} -> {} by {mode}: {distance_km:.0} km, {duration_hours:.1}h",
            previous.place.name,
            arrival.place.name
        );

        let arrived = clock.after_travel(duration_hours)?;
        let leaving = arrived.after_stay(arrival.stay_hours)?;
        let id = ItineraryStopId(sequence_number(self.stops.len())?);
        let leg_id = LegId(sequence_number(self.legs.len())?);
        self.stops.push(ItineraryStop {
            id,
            kind: arrival.kind,
            place: arrival.place,
            arrival: arrived.0,
            departure: leaving.0,
            requesters: arrival.requesters,
        });
        self.legs.push(Leg {
            id: leg_id,
            from,
            to: id,
            mode,
            duration_hours,
            distance_km,
        });
        Ok(leaving)
    }
}

fn sequence_number(len: usize) -> Result<u32, PlanError> {
    u32::try_from(len).map_err(|_| PlanError::ScheduleOverflow)
}
