//! The `Node` trait: the contract between a game and the search engine.
//!
//! A node is one immutable game position. The engine keys its statistics by
//! node value, so two positions that are equal must hash identically no
//! matter how they were reached. Games that deliberately distinguish move
//! orders (for example by keeping the move history in the state) get a
//! path-sensitive tree instead of a transposition-sharing one.

use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Errors raised by a node that is used outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The operation is not defined for this state, e.g. `reward()` on a
    /// position that is still in play.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Capability set a game state must implement to be searched.
///
/// # Reward convention
///
/// `reward()` is scored from the perspective of the player *to move* at the
/// terminal position: `1.0` is a win, `0.0` a loss and `0.5` a draw. Any value
/// in `[0.0, 1.0]` is accepted, as the engine only ever complements it
/// (`1.0 - r`) when switching perspective.
///
/// # Example
///
/// ```rust
/// use engine_core::{Node, NodeError};
///
/// /// Players alternately take one or two stones; whoever cannot move loses.
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Stones(u8);
///
/// impl Node for Stones {
///     fn children(&self) -> Vec<Self> {
///         (1..=2).filter(|n| *n <= self.0).map(|n| Stones(self.0 - n)).collect()
///     }
///
///     fn is_terminal(&self) -> bool {
///         self.0 == 0
///     }
///
///     fn reward(&self) -> Result<f64, NodeError> {
///         if !self.is_terminal() {
///             return Err(NodeError::InvalidState("game still in play".into()));
///         }
///         Ok(0.0) // the player to move has no stones left to take
///     }
/// }
///
/// assert_eq!(Stones(2).children(), vec![Stones(1), Stones(0)]);
/// assert!(Stones(3).reward().is_err());
/// ```
pub trait Node: Clone + Eq + Hash {
    /// All legal successor states.
    ///
    /// Must be empty exactly when [`Node::is_terminal`] is true. Duplicates
    /// are tolerated; the engine keeps the first occurrence.
    fn children(&self) -> Vec<Self>;

    /// A randomly sampled successor, used by rollouts.
    ///
    /// The default samples uniformly from [`Node::children`] on every call.
    /// Implementations may override it to avoid enumerating every successor,
    /// but the result must always be a member of `children()`.
    fn random_child<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, NodeError> {
        self.children().choose(rng).cloned().ok_or_else(|| {
            NodeError::InvalidState("random_child called on a state without successors".into())
        })
    }

    /// True iff the state has no legal successor.
    fn is_terminal(&self) -> bool;

    /// Outcome of a terminal state for the player to move.
    ///
    /// Fails with [`NodeError::InvalidState`] when called on a non-terminal
    /// state.
    fn reward(&self) -> Result<f64, NodeError>;
}
