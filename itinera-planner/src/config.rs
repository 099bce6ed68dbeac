//! Tunables for [`ItineraryPlanner`](crate::ItineraryPlanner).

use std::num::NonZeroUsize;

use crate::{SpeedModel, TransportPolicy};

/// Configuration for [`ItineraryPlanner`](crate::ItineraryPlanner).
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use itinera_planner::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_seed(7)
///     .with_candidates(NonZeroUsize::new(4).expect("non-zero"));
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.candidates.get(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Seed for the selector's traveler shuffle. Candidate `i` uses
    /// `seed + i`.
    pub seed: u64,
    /// Number of candidate itineraries to build and rank.
    pub candidates: NonZeroUsize,
    /// Upper bound on fair round-robin passes during selection.
    pub max_fairness_passes: usize,
    /// Multiplier on total requested stay used as the budget for open-ended
    /// trips.
    pub budget_slack: f64,
    /// When legs fly.
    pub transport: TransportPolicy,
    /// How long legs take.
    pub speeds: SpeedModel,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            candidates: NonZeroUsize::MIN,
            max_fairness_passes: 10,
            budget_slack: 1.5,
            transport: TransportPolicy::default(),
            speeds: SpeedModel::default(),
        }
    }
}

impl PlannerConfig {
    /// Replace the base seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the number of candidates.
    #[must_use]
    pub const fn with_candidates(mut self, candidates: NonZeroUsize) -> Self {
        self.candidates = candidates;
        self
    }

    /// Replace the fairness pass limit.
    #[must_use]
    pub const fn with_max_fairness_passes(mut self, passes: usize) -> Self {
        self.max_fairness_passes = passes;
        self
    }

    /// Replace the open-ended budget multiplier.
    #[must_use]
    pub const fn with_budget_slack(mut self, slack: f64) -> Self {
        self.budget_slack = slack;
        self
    }

    /// Replace the transport policy.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportPolicy) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the speed model.
    #[must_use]
    pub fn with_speeds(mut self, speeds: SpeedModel) -> Self {
        self.speeds = speeds;
        self
    }
}
