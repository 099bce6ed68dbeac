//! Transport mode choice and coarse travel-time estimates.
//!
//! Estimates are deliberately rough: they grow with distance and differ in
//! slope by mode, but do not model real timetables or traffic.

use itinera_core::{Place, TransportMode, haversine_km};

/// Rules deciding whether a leg flies.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportPolicy {
    /// Legs at least this long (km) fly.
    pub air_threshold_km: f64,
    /// When set, legs between places in different known countries fly once
    /// they are at least this long (km).
    pub cross_border_air_km: Option<f64>,
}

impl Default for TransportPolicy {
    fn default() -> Self {
        Self {
            air_threshold_km: 700.0,
            cross_border_air_km: None,
        }
    }
}

impl TransportPolicy {
    /// Choose the mode for travel between two places.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use itinera_core::{Place, TransportMode};
    /// use itinera_planner::TransportPolicy;
    ///
    /// let tokyo = Place::new("Tokyo", Coord { x: 139.69, y: 35.69 });
    /// let london = Place::new("London", Coord { x: -0.13, y: 51.51 });
    /// let policy = TransportPolicy::default();
    /// assert_eq!(policy.mode_between(&tokyo, &london), TransportMode::Air);
    /// ```
    #[must_use]
    pub fn mode_between(&self, from: &Place, to: &Place) -> TransportMode {
        self.mode_for_distance(from, to, haversine_km(from.location, to.location))
    }

    /// Choose the mode when the distance is already known.
    #[must_use]
    pub fn mode_for_distance(&self, from: &Place, to: &Place, distance_km: f64) -> TransportMode {
        if distance_km >= self.air_threshold_km {
            return TransportMode::Air;
        }
        if let Some(min_km) = self.cross_border_air_km
            && distance_km >= min_km
            && crosses_border(from, to)
        {
            return TransportMode::Air;
        }
        TransportMode::Land
    }
}

fn crosses_border(from: &Place, to: &Place) -> bool {
    match (&from.country, &to.country) {
        (Some(a), Some(b)) => !a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Average speeds and fixed overheads behind travel-time estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedModel {
    /// Cruise speed for flights, km/h.
    pub air_cruise_kmh: f64,
    /// Fixed time spent in airports per flight, hours.
    pub air_overhead_hours: f64,
    /// Shortest possible flight, hours.
    pub air_min_hours: f64,
    /// Long-haul land speed, km/h.
    pub land_kmh: f64,
    /// Speed for short local hops, km/h.
    pub local_kmh: f64,
    /// Distance up to which the local speed applies, km.
    pub local_max_km: f64,
    /// Shortest possible land leg, hours.
    pub land_min_hours: f64,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            air_cruise_kmh: 800.0,
            air_overhead_hours: 2.5,
            air_min_hours: 3.0,
            land_kmh: 80.0,
            local_kmh: 40.0,
            local_max_km: 50.0,
            land_min_hours: 1.0,
        }
    }
}

impl SpeedModel {
    /// Estimate hours to cover `distance_km` by `mode`.
    ///
    /// Land legs run at the local speed for their first `local_max_km` and
    /// at the long-haul speed beyond, so the estimate never drops as the
    /// distance grows.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::TransportMode;
    /// use itinera_planner::SpeedModel;
    ///
    /// let speeds = SpeedModel::default();
    /// assert_eq!(speeds.estimate_hours(1.0, TransportMode::Land), 1.0);
    /// assert_eq!(speeds.estimate_hours(8_000.0, TransportMode::Air), 12.5);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time is distance over speed plus overheads"
    )]
    pub fn estimate_hours(&self, distance_km: f64, mode: TransportMode) -> f64 {
        let distance = distance_km.max(0.0);
        match mode {
            TransportMode::Air => {
                (distance / self.air_cruise_kmh + self.air_overhead_hours).max(self.air_min_hours)
            }
            TransportMode::Land => {
                let local = distance.min(self.local_max_km);
                let long_haul = distance - local;
                (local / self.local_kmh + long_haul / self.land_kmh).max(self.land_min_hours)
            }
        }
    }
}
