//! MCTS configuration parameters.

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Weight C of the exploration term in the UCT formula.
    /// Higher values encourage exploration of under-visited children,
    /// lower values favor children with a high average reward.
    pub exploration_weight: f64,

    /// Number of rollouts performed by `Mcts::run` before choosing a move.
    pub num_rollouts: u32,

    /// Seed for the rollout RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_weight: 1.0,
            num_rollouts: 1000,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            exploration_weight: 1.0,
            num_rollouts: 100,
            seed: Some(0),
        }
    }

    /// Builder pattern: set the exploration weight.
    pub fn with_exploration_weight(mut self, c: f64) -> Self {
        self.exploration_weight = c;
        self
    }

    /// Builder pattern: set number of rollouts.
    pub fn with_rollouts(mut self, n: u32) -> Self {
        self.num_rollouts = n;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the exploration weight is a finite, non-negative number.
    ///
    /// A NaN weight makes every UCT score NaN, which would silently pin
    /// selection to the first child.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_weight must be finite and non-negative, got {}",
                self.exploration_weight
            )));
        }
        Ok(())
    }
}
