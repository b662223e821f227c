//! Policy backed by the UCT searcher
//!
//! Runs the configured number of rollouts from the current position, then
//! plays the successor with the best average reward. The tree is kept for the
//! whole game so later moves reuse earlier statistics.

use anyhow::Result;
use engine_core::Node;
use mcts::{Mcts, MctsConfig, SearchResult};

use crate::policy::Policy;

pub struct MctsPolicy<N: Node> {
    search: Mcts<N>,
    /// Result of the most recent search
    last: Option<SearchResult<N>>,
}

impl<N: Node> std::fmt::Debug for MctsPolicy<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MctsPolicy")
            .field("config", self.search.config())
            .field("tree_nodes", &self.search.tree().len())
            .finish()
    }
}

impl<N: Node> MctsPolicy<N> {
    pub fn new(config: MctsConfig) -> Result<Self> {
        Ok(Self {
            search: Mcts::try_new(config)?,
            last: None,
        })
    }

    /// Statistics of the most recent search, if any.
    pub fn last_search(&self) -> Option<&SearchResult<N>> {
        self.last.as_ref()
    }

    pub fn tree_size(&self) -> usize {
        self.search.tree().len()
    }
}

impl<N: Node> Policy<N> for MctsPolicy<N> {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn select_move(&mut self, node: &N) -> Result<N> {
        let result = self.search.run(node)?;
        let choice = result.choice.clone();
        self.last = Some(result);
        Ok(choice)
    }

    fn new_game(&mut self) {
        self.search.reset();
        self.last = None;
    }
}
