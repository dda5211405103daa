//! Search configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Weights of the static move heuristic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    /// Points per free, reachable neighbour of the destination.
    pub connectivity: i64,

    /// Multiplier on the change in summed tracker danger.
    pub distance: f64,

    /// Secret-ticket score for single moves, indexed by the number of
    /// transport kinds at the source minus one. Clamped to the last entry.
    pub secret_single: [i64; 3],

    /// Same as `secret_single`, for each secret ticket in a double move.
    pub secret_double: [i64; 3],

    /// Added to every double move.
    pub double_penalty: i64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            connectivity: 5,
            distance: 40.0,
            secret_single: [-10, 0, 15],
            secret_double: [-10, 5, 15],
            double_penalty: -10,
        }
    }
}

impl HeuristicWeights {
    pub fn with_connectivity(mut self, weight: i64) -> Self {
        self.connectivity = weight;
        self
    }

    pub fn with_distance(mut self, weight: f64) -> Self {
        self.distance = weight;
        self
    }

    pub fn with_double_penalty(mut self, penalty: i64) -> Self {
        self.double_penalty = penalty;
        self
    }
}

/// Minimax search configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Deepest iteration, in whole rounds (fugitive move plus every
    /// tracker reply). 0 ranks root moves by the heuristic only.
    pub max_depth: u32,

    /// Share of the time budget the search may use (default 0.8).
    /// The rest is left for the caller.
    pub budget_fraction: f64,

    /// Prune with alpha-beta. Root scores are exact either way.
    pub alpha_beta: bool,

    /// Within a round, expand only the lowest tracker that can move when
    /// the remaining trackers can't interfere with each other, so orderings
    /// of the same replies are searched once.
    pub canonical_tracker_order: bool,

    /// Evaluate root moves on the rayon pool.
    pub parallel: bool,

    pub weights: HeuristicWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            budget_fraction: 0.8,
            alpha_beta: true,
            canonical_tracker_order: true,
            parallel: true,
            weights: HeuristicWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom max depth.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_budget_fraction(mut self, fraction: f64) -> Self {
        self.budget_fraction = fraction;
        self
    }

    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    pub fn with_canonical_tracker_order(mut self, enabled: bool) -> Self {
        self.canonical_tracker_order = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The part of `budget` the search may spend.
    ///
    /// Fractions outside `[0, 1]` are clamped; a non-finite fraction uses
    /// the whole budget.
    #[must_use]
    pub fn soft_budget(&self, budget: Duration) -> Duration {
        let fraction = if self.budget_fraction.is_finite() {
            self.budget_fraction.clamp(0.0, 1.0)
        } else {
            1.0
        };
        budget.mul_f64(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 3);
        assert!((config.budget_fraction - 0.8).abs() < 1e-9);
        assert!(config.alpha_beta);
        assert!(config.canonical_tracker_order);
        assert_eq!(config.weights.connectivity, 5);
        assert_eq!(config.weights.secret_double, [-10, 5, 15]);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_max_depth(5)
            .with_alpha_beta(false)
            .with_parallel(false)
            .with_weights(HeuristicWeights::default().with_distance(10.0));

        assert_eq!(config.max_depth, 5);
        assert!(!config.alpha_beta);
        assert!(!config.parallel);
        assert_eq!(config.weights.distance, 10.0);
    }

    #[test]
    fn test_soft_budget() {
        let budget = Duration::from_millis(1000);
        assert_eq!(SearchConfig::default().soft_budget(budget), Duration::from_millis(800));

        let over = SearchConfig::default().with_budget_fraction(3.0);
        assert_eq!(over.soft_budget(budget), budget);

        let nan = SearchConfig::default().with_budget_fraction(f64::NAN);
        assert_eq!(nan.soft_budget(budget), budget);
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_max_depth(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
