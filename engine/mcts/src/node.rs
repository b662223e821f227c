//! Per-node search statistics.
//!
//! Every node the search has visited carries a visit count `N` and an
//! accumulated reward `Q`. `Q` is scored from the perspective of the player
//! who moved *into* the node, so a parent compares its children's averages
//! directly, with no sign flip.

/// Visit count and accumulated reward of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    /// Number of rollouts whose path went through this node (N)
    pub visits: u32,

    /// Sum of rewards backpropagated through this node (Q)
    pub total_reward: f64,
}

impl NodeStats {
    /// Create stats with the given visit count and reward sum.
    pub fn new(visits: u32, total_reward: f64) -> Self {
        Self {
            visits,
            total_reward,
        }
    }

    /// Average reward Q/N.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    /// Average reward used to rank moves after search.
    /// Unvisited nodes score negative infinity so they never beat a visited one.
    #[inline]
    pub fn choice_score(&self) -> f64 {
        if self.visits == 0 {
            f64::NEG_INFINITY
        } else {
            self.mean_value()
        }
    }

    /// UCT score for child selection.
    /// UCT(child) = Q/N + C * sqrt(ln(N_parent) / N)
    ///
    /// Takes pre-computed ln(N_parent) to avoid redundant log calls when
    /// comparing multiple children. The caller guarantees `visits > 0`.
    #[inline]
    pub fn uct_score(&self, ln_parent_visits: f64, exploration_weight: f64) -> f64 {
        debug_assert!(self.visits > 0, "UCT score of an unvisited node");
        let n = self.visits as f64;
        self.total_reward / n + exploration_weight * (ln_parent_visits / n).sqrt()
    }

    /// Record one rollout's reward.
    #[inline]
    pub fn record(&mut self, reward: f64) {
        self.visits += 1;
        self.total_reward += reward;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_value() {
        let mut stats = NodeStats::default();

        // Unvisited
        assert!(stats.mean_value().abs() < 1e-12);

        // After visits
        stats.visits = 4;
        stats.total_reward = 2.0;
        assert!((stats.mean_value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_choice_score_unvisited_is_neg_infinity() {
        assert_eq!(NodeStats::default().choice_score(), f64::NEG_INFINITY);
        assert!((NodeStats::new(4, 3.0).choice_score() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        // Parent visited 5 times, C = 1
        let ln_parent = 5f64.ln();

        // 1.0/2 + sqrt(ln 5 / 2) = 0.5 + 0.897061...
        let a = NodeStats::new(2, 1.0).uct_score(ln_parent, 1.0);
        assert!((a - 1.397061).abs() < 1e-6);

        // 2.5/3 + sqrt(ln 5 / 3) = 0.833333... + 0.732447...
        let b = NodeStats::new(3, 2.5).uct_score(ln_parent, 1.0);
        assert!((b - 1.565781).abs() < 1e-6);
    }

    #[test]
    fn test_uct_score_without_exploration_is_mean() {
        let stats = NodeStats::new(8, 6.0);
        let score = stats.uct_score(100f64.ln(), 0.0);
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_record() {
        let mut stats = NodeStats::default();
        stats.record(1.0);
        stats.record(0.5);
        assert_eq!(stats.visits, 2);
        assert!((stats.total_reward - 1.5).abs() < 1e-12);
    }
}
