//! Monte Carlo Tree Search (MCTS) with UCT selection and random rollouts.
//!
//! This crate provides a game-agnostic search engine that works with any
//! state implementing the `engine-core` [`Node`](engine_core::Node) trait.
//!
//! # Overview
//!
//! The engine grows a statistics-annotated tree one rollout at a time. Each
//! rollout consists of four phases:
//!
//! 1. **Selection**: Descend from the root with UCT (Upper Confidence bound
//!    applied to Trees) until an unexpanded node, a terminal node, or the
//!    first never-expanded child is reached
//! 2. **Expansion**: Record the full child set of the selected leaf
//! 3. **Simulation**: Play uniformly random moves from the leaf to the end of
//!    the game, without touching the tree
//! 4. **Backpropagation**: Add one visit and the rollout's reward to every node
//!    on the path, complementing the reward (`1 - r`) at each ply
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Node;
//! use games_tictactoe::Board;
//! use mcts::{Mcts, MctsConfig};
//!
//! let mut search = Mcts::new(MctsConfig::for_testing().with_seed(42));
//! let mut board = Board::new();
//!
//! while !board.is_terminal() {
//!     for _ in 0..200 {
//!         search.do_rollout(&board).unwrap();
//!     }
//!     board = search.choose(&board).unwrap();
//! }
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `exploration_weight`: Weight C of the UCT exploration term (default: 1.0)
//! - `num_rollouts`: Rollouts performed by [`Mcts::run`] (default: 1000)
//! - `seed`: Seed for the rollout RNG (default: drawn from entropy)
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                       Mcts<N>                         │
//! ├───────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌────────────┐  ┌──────────────┐   │
//! │  │ SearchTree   │  │ ChaCha20Rng│  │  MctsConfig  │   │
//! │  │ N, Q, kids   │  │ (rollouts) │  │ (C, budget)  │   │
//! │  └──────┬───────┘  └─────┬──────┘  └──────┬───────┘   │
//! │         ▼                ▼                ▼           │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │    select → expand → simulate → backpropagate   │  │
//! │  └─────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod node;
pub mod search;
pub mod shared;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::NodeStats;
pub use search::{Mcts, SearchError, SearchResult};
pub use shared::SharedMcts;
pub use tree::{ChildStats, SearchTree, TreeStats};
