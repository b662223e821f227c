//! MCTS search implementation.
//!
//! Implements the UCT rollout loop:
//! 1. Selection: Descend with UCT to an unexpanded, terminal, or unexplored node
//! 2. Expansion: Record the leaf's children
//! 3. Simulation: Random playout from the leaf to a terminal state
//! 4. Backpropagation: Update statistics along the path

use engine_core::{complement, Node, NodeError};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::trace;

use crate::config::MctsConfig;
use crate::tree::SearchTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Cannot choose a move from a terminal node")]
    TerminalNode,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Search engine lock poisoned by a panicking worker")]
    Poisoned,
}

/// Result of a complete search from one position.
#[derive(Debug, Clone)]
pub struct SearchResult<N> {
    /// Chosen successor of the root
    pub choice: N,

    /// Visit count of the root after the search
    pub root_visits: u32,

    /// Average reward of the chosen successor, from the perspective of the
    /// player making the move
    pub value: f64,

    /// Number of rollouts performed by this search
    pub rollouts: u32,
}

/// UCT Monte Carlo tree searcher.
///
/// First improve the tree with [`Mcts::do_rollout`], then pick a move with
/// [`Mcts::choose`]. The tree persists across calls, so statistics gathered
/// while searching one position are reused when a later search reaches the
/// same positions.
#[derive(Debug)]
pub struct Mcts<N: Node> {
    tree: SearchTree<N>,
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl<N: Node> Mcts<N> {
    /// Create a searcher with an empty tree.
    /// The rollout RNG is seeded from `config.seed`, or from entropy if unset.
    pub fn new(config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a searcher after checking `config`.
    pub fn try_new(config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a searcher that draws its randomness from `rng`.
    ///
    /// `config` must pass [`MctsConfig::validate`]; use [`Mcts::try_new`]
    /// when it comes from user input.
    pub fn with_rng(config: MctsConfig, rng: ChaCha20Rng) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid exploration weight {}",
            config.exploration_weight
        );
        Self {
            tree: SearchTree::new(),
            config,
            rng,
        }
    }

    /// The search configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree<N> {
        &self.tree
    }

    /// Discard every statistic and expansion gathered so far.
    pub fn reset(&mut self) {
        self.tree.clear();
    }

    /// Choose the best successor of `node` (choose a move in the game).
    ///
    /// Picks the child with the highest average reward. Unvisited children are
    /// never chosen over visited ones. If `node` was never expanded, falls back
    /// to a random child.
    pub fn choose(&mut self, node: &N) -> Result<N, SearchError> {
        if node.is_terminal() {
            return Err(SearchError::TerminalNode);
        }

        if !self.tree.is_expanded(node) {
            return Ok(node.random_child(&mut self.rng)?);
        }

        self.tree.best_child(node).cloned().ok_or_else(|| {
            SearchError::InvalidState("non-terminal node was expanded without children".into())
        })
    }

    /// Make the tree one layer better (one select-expand-simulate-backpropagate pass).
    pub fn do_rollout(&mut self, node: &N) -> Result<(), SearchError> {
        // Selection: find an unexplored descendant
        let (leaf, path) = self.select(node);

        // Expansion
        let newly_expanded = self.expand(&leaf)?;

        // Simulation. A failed playout must not leave an expanded node without
        // visits behind, or later UCT selection would divide by zero.
        let reward = match self.simulate(&leaf) {
            Ok(reward) => reward,
            Err(e) => {
                if newly_expanded {
                    self.tree.forget_expansion(&leaf);
                }
                return Err(e);
            }
        };

        // Backpropagation
        self.tree.backpropagate(&path, reward);

        trace!(path_len = path.len(), reward, "MCTS rollout complete");

        Ok(())
    }

    /// Run `config.num_rollouts` rollouts from `node`, then choose a move.
    pub fn run(&mut self, node: &N) -> Result<SearchResult<N>, SearchError> {
        if node.is_terminal() {
            return Err(SearchError::TerminalNode);
        }

        for _ in 0..self.config.num_rollouts {
            self.do_rollout(node)?;
        }

        let choice = self.choose(node)?;
        Ok(SearchResult {
            value: self.tree.get(&choice).mean_value(),
            root_visits: self.tree.visits(node),
            rollouts: self.config.num_rollouts,
            choice,
        })
    }

    /// Select a leaf below `node`, returning it with the path leading to it
    /// (root first, leaf last).
    ///
    /// Descends with UCT while the current node is expanded and has children.
    /// Stops at an unexpanded or childless node, or steps into the first child
    /// that has never been expanded and stops there.
    fn select(&self, node: &N) -> (N, Vec<N>) {
        let mut path = Vec::new();
        let mut current = node.clone();

        loop {
            match self.tree.children(&current) {
                // Unexpanded or terminal
                None => break,
                Some(children) if children.is_empty() => break,
                Some(_) => {}
            }

            if let Some(unexplored) = self.tree.unexplored_child(&current).cloned() {
                path.push(current);
                current = unexplored;
                break;
            }

            // Descend a layer deeper
            let next = match self
                .tree
                .select_uct(&current, self.config.exploration_weight)
            {
                Some(child) => child.clone(),
                None => break,
            };
            path.push(current);
            current = next;
        }

        path.push(current.clone());
        (current, path)
    }

    /// Record the children of `node` if not yet expanded.
    /// Returns whether a new expansion was recorded.
    fn expand(&mut self, node: &N) -> Result<bool, SearchError> {
        if self.tree.is_expanded(node) {
            return Ok(false);
        }

        let children = node.children();
        if children.is_empty() != node.is_terminal() {
            return Err(SearchError::InvalidState(format!(
                "node reports {} children but is_terminal() = {}",
                children.len(),
                node.is_terminal()
            )));
        }

        Ok(self.tree.expand(node.clone(), children))
    }

    /// Reward of a random playout from `node`, from the perspective of the
    /// player who moved into `node`.
    fn simulate(&mut self, node: &N) -> Result<f64, SearchError> {
        let mut current = node.clone();
        let mut invert = true;

        loop {
            if current.is_terminal() {
                let reward = current.reward()?;
                if !(0.0..=1.0).contains(&reward) {
                    return Err(SearchError::InvalidState(format!(
                        "terminal reward {reward} outside [0, 1]"
                    )));
                }
                return Ok(if invert { complement(reward) } else { reward });
            }
            current = current.random_child(&mut self.rng)?;
            invert = !invert;
        }
    }
}
