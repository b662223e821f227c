//! Core traits and types for the UCT search engine
//!
//! This crate provides the capability set every game state must expose before
//! it can be searched:
//! - `Node`: successor enumeration, random successor sampling, terminal check
//!   and terminal reward, plus value identity through `Eq + Hash`
//! - `NodeError`: contract violations reported by a game state
//! - `game_utils`: reward helpers shared by two-player zero-sum games
//!
//! The search engine never inspects a state's internals; it only calls the
//! methods of [`Node`].

pub mod game_utils;
pub mod node;

// Re-export main types for convenience
pub use game_utils::{complement, terminal_reward, DRAW, LOSS, WIN};
pub use node::{Node, NodeError};
