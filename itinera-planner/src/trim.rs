//! Shortening long stays so an itinerary ends by its deadline.
//!
//! Only stays of two days or more shrink, each in proportion to its share of
//! the total stay time, and never below one day. Travel gaps between stops
//! are preserved: every arrival keeps its original distance from the
//! previous departure.

use itinera_core::{Itinerary, ItineraryStop, PlanError, PlanWarning};
use jiff::{SignedDuration, Timestamp};

const DAY: SignedDuration = SignedDuration::from_hours(24);

/// A possibly shortened itinerary and whether it still overruns.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOutcome {
    /// The itinerary after trimming; unchanged when no trimming was needed.
    pub itinerary: Itinerary,
    /// Set when the final arrival remains after the deadline.
    pub warning: Option<PlanWarning>,
}

/// Shorten stays in `itinerary` so its final arrival moves towards
/// `deadline`.
///
/// Without a deadline, or when the final arrival is already on time, the
/// itinerary is returned untouched.
///
/// # Errors
/// Returns [`PlanError::ScheduleOverflow`] when rebased dates leave the
/// supported range.
pub fn trim_to_deadline(
    itinerary: Itinerary,
    deadline: Option<Timestamp>,
) -> Result<TrimOutcome, PlanError> {
    let Some(due) = deadline else {
        return Ok(untouched(itinerary));
    };
    let Some(final_arrival) = itinerary.last_stop().map(|stop| stop.arrival) else {
        return Ok(untouched(itinerary));
    };
    if final_arrival <= due {
        return Ok(untouched(itinerary));
    }

    let overrun_days = whole_days_up(final_arrival.duration_since(due));
    let total_stay_days = itinerary
        .stops
        .iter()
        .filter(|stop| !stop.is_airport_waypoint())
        .map(|stop| days(stop.stay()))
        .sum::<f64>();
    log::debug!(
        "itinerary overruns its deadline by {overrun_days} days; {total_stay_days:.1} days of stays to trim"
    );

    let Itinerary {
        id,
        stops,
        legs,
        satisfaction,
    } = itinerary;
    let trimmed = Itinerary {
        id,
        stops: rebase(&stops, overrun_days, total_stay_days)?,
        legs,
        satisfaction,
    };

    let warning = trimmed
        .last_stop()
        .map(|stop| stop.arrival)
        .filter(|&arrival| arrival > due)
        .map(|arrival| {
            log::warn!("trimming stays left the final arrival {arrival} after deadline {due}");
            PlanWarning::DeadlineOverrunAfterTrim {
                deadline: due,
                final_arrival: arrival,
            }
        });
    Ok(TrimOutcome {
        itinerary: trimmed,
        warning,
    })
}

const fn untouched(itinerary: Itinerary) -> TrimOutcome {
    TrimOutcome {
        itinerary,
        warning: None,
    }
}

/// Rewrite stop times, shrinking eligible stays and keeping travel gaps.
fn rebase(
    stops: &[ItineraryStop],
    overrun_days: f64,
    total_stay_days: f64,
) -> Result<Vec<ItineraryStop>, PlanError> {
    let mut rebased: Vec<ItineraryStop> = Vec::with_capacity(stops.len());
    let mut previous: Option<(&ItineraryStop, Timestamp)> = None;
    for stop in stops {
        let arrival = match previous {
            Some((original, new_departure)) => new_departure
                .checked_add(stop.arrival.duration_since(original.departure))
                .map_err(|_| PlanError::ScheduleOverflow)?,
            None => stop.arrival,
        };
        let stay = trimmed_stay(stop, overrun_days, total_stay_days);
        let departure = arrival
            .checked_add(stay)
            .map_err(|_| PlanError::ScheduleOverflow)?;
        previous = Some((stop, departure));
        rebased.push(ItineraryStop {
            arrival,
            departure,
            ..stop.clone()
        });
    }
    Ok(rebased)
}

/// New stay for `stop`: reduced by its proportional share of the overrun in
/// whole days, floored at one day. Airports and stays under two days keep
/// their length.
#[expect(
    clippy::float_arithmetic,
    reason = "stay reductions are proportional shares of the overrun"
)]
fn trimmed_stay(stop: &ItineraryStop, overrun_days: f64, total_stay_days: f64) -> SignedDuration {
    let stay = stop.stay();
    let stay_days = days(stay);
    if stop.is_airport_waypoint() || stay_days < 2.0 || total_stay_days <= 0.0 {
        return stay;
    }
    let reduction_days = (stay_days * overrun_days / total_stay_days).floor();
    let reduced = stay.saturating_sub(DAY.saturating_mul(whole(reduction_days)));
    reduced.max(DAY)
}

#[expect(clippy::float_arithmetic, reason = "converting durations to days")]
fn days(duration: SignedDuration) -> f64 {
    duration.as_secs_f64() / 86_400.0
}

fn whole_days_up(duration: SignedDuration) -> f64 {
    days(duration).ceil()
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "reduction days are clamped to the i32 range first"
)]
fn whole(value: f64) -> i32 {
    value.clamp(0.0, f64::from(i32::MAX)) as i32
}
