//! Shared utilities for two-player game implementations
//!
//! Rewards live on a `[0.0, 1.0]` scale where the two players' outcomes always
//! sum to one. Switching perspective is therefore `1.0 - reward`, never a
//! negation.

use crate::node::NodeError;

/// Reward for a win.
pub const WIN: f64 = 1.0;
/// Reward for a draw.
pub const DRAW: f64 = 0.5;
/// Reward for a loss.
pub const LOSS: f64 = 0.0;

/// The same outcome seen from the opponent's side.
///
/// # Example
/// ```
/// use engine_core::game_utils::{complement, DRAW, LOSS, WIN};
///
/// assert_eq!(complement(WIN), LOSS);
/// assert_eq!(complement(DRAW), DRAW);
/// ```
#[inline]
pub fn complement(reward: f64) -> f64 {
    1.0 - reward
}

/// Calculate the terminal reward for a two-player zero-sum game.
///
/// Returns the reward from the perspective of `to_move`, the player whose turn
/// it would be at the finished position.
///
/// # Arguments
/// * `winner` - Winner indicator: 0=ongoing, 1=player1 wins, 2=player2 wins, 3=draw
/// * `to_move` - The player to move at the terminal position (1 or 2)
///
/// # Example
/// ```
/// use engine_core::game_utils::terminal_reward;
///
/// // Player 1 just completed a line, so player 2 is to move and has lost
/// assert_eq!(terminal_reward(1, 2).unwrap(), 0.0);
///
/// // Draw
/// assert_eq!(terminal_reward(3, 1).unwrap(), 0.5);
///
/// // Game ongoing
/// assert!(terminal_reward(0, 1).is_err());
/// ```
pub fn terminal_reward(winner: u8, to_move: u8) -> Result<f64, NodeError> {
    match winner {
        0 => Err(NodeError::InvalidState(
            "reward requested for a game still in play".into(),
        )),
        1 | 2 if winner == to_move => Ok(WIN),
        1 | 2 => Ok(LOSS),
        3 => Ok(DRAW),
        other => Err(NodeError::InvalidState(format!(
            "unknown winner code {other}"
        ))),
    }
}
