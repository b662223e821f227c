//! Test games shared by the integration tests.

use engine_core::{complement, Node, NodeError, DRAW, LOSS, WIN};

/// Three plies, two choices per ply, eight distinct endings.
///
/// The first player moves on plies one and three. Outcomes for the first
/// player:
/// - opening with `0` always loses
/// - the single ending `[1, 1, 1]` wins
/// - every other ending after opening `1` is a draw
///
/// The move history is the identity, so the tree is path-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreePly {
    moves: Vec<u8>,
}

impl ThreePly {
    pub const DEPTH: usize = 3;

    pub fn root() -> Self {
        Self { moves: Vec::new() }
    }

    pub fn after(moves: &[u8]) -> Self {
        Self {
            moves: moves.to_vec(),
        }
    }

    /// Outcome for the player who moved first.
    fn first_player_outcome(&self) -> f64 {
        match self.moves.as_slice() {
            [0, ..] => LOSS,
            [1, 1, 1] => WIN,
            _ => DRAW,
        }
    }
}

impl Node for ThreePly {
    fn children(&self) -> Vec<Self> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..2)
            .map(|choice| {
                let mut moves = self.moves.clone();
                moves.push(choice);
                Self { moves }
            })
            .collect()
    }

    fn is_terminal(&self) -> bool {
        self.moves.len() == Self::DEPTH
    }

    fn reward(&self) -> Result<f64, NodeError> {
        if !self.is_terminal() {
            return Err(NodeError::InvalidState(format!(
                "reward after {} of {} plies",
                self.moves.len(),
                Self::DEPTH
            )));
        }
        // After an odd number of plies the second player is to move
        Ok(complement(self.first_player_outcome()))
    }
}
