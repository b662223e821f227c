//! TicTacToe reference game for the UCT search engine
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the `Node` trait for a two-player game.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::Board;
//! use engine_core::Node;
//!
//! let board = Board::new();
//! assert_eq!(board.children().len(), 9);
//!
//! let board = board.make_move(4).unwrap();
//! assert_eq!(board.cell(4), 1);
//! assert!(!board.is_terminal());
//! ```

use std::fmt;

use engine_core::{terminal_reward, Node, NodeError};
use rand::seq::IteratorRandom;
use rand::Rng;
use thiserror::Error;

/// Player 1, who moves first.
pub const X: u8 = 1;
/// Player 2.
pub const O: u8 = 2;
/// Winner code for a full board without a line.
pub const DRAW: u8 = 3;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Errors from applying a move to a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Position {0} is outside the board")]
    OutOfRange(u8),

    #[error("Position {0} is already occupied")]
    Occupied(u8),

    #[error("Game is already over")]
    GameOver,
}

/// TicTacToe position
///
/// Equality and hashing cover the whole position, so transpositions (the same
/// cells reached through different move orders) share one tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Board representation: 0=empty, 1=X, 2=O
    cells: [u8; 9],
    /// Player to move: 1=X, 2=O. Still flips on the final move, so at a
    /// finished position it names the player who did not complete the game.
    turn: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl Board {
    /// Create an empty board with X to move
    pub fn new() -> Self {
        Self {
            cells: [0; 9],
            turn: X,
            winner: 0,
        }
    }

    /// Content of a cell (0=empty, 1=X, 2=O)
    pub fn cell(&self, position: usize) -> u8 {
        self.cells[position]
    }

    /// Player to move
    pub fn turn(&self) -> u8 {
        self.turn
    }

    /// Winner code: 0=ongoing, 1=X, 2=O, 3=draw
    pub fn winner(&self) -> u8 {
        self.winner
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Number of pieces placed so far
    pub fn moves_played(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.cells[pos as usize] == 0)
            .collect()
    }

    /// Place the current player's piece and return the resulting board
    pub fn make_move(&self, position: u8) -> Result<Board, MoveError> {
        if self.is_done() {
            return Err(MoveError::GameOver);
        }
        if position >= 9 {
            return Err(MoveError::OutOfRange(position));
        }
        if self.cells[position as usize] != 0 {
            return Err(MoveError::Occupied(position));
        }
        Ok(self.place(position as usize))
    }

    /// The position that differs between `self` and `next`, if `next` follows
    /// from `self` by a single move.
    pub fn move_to(&self, next: &Board) -> Option<u8> {
        (0..9u8).find(|&pos| {
            self.cells[pos as usize] == 0
                && next.cells[pos as usize] == self.turn
                && self.place(pos as usize) == *next
        })
    }

    /// Apply a move already known to be legal
    fn place(&self, position: usize) -> Board {
        let mut next = *self;
        next.cells[position] = self.turn;
        next.winner = Self::check_winner(&next.cells);
        next.turn = if self.turn == X { O } else { X };
        next
    }

    /// Check for winner on the board
    fn check_winner(cells: &[u8; 9]) -> u8 {
        for &[a, b, c] in &LINES {
            if cells[a] != 0 && cells[a] == cells[b] && cells[b] == cells[c] {
                return cells[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if cells.iter().all(|&cell| cell != 0) {
            return DRAW;
        }

        0 // Game ongoing
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Board {
    fn children(&self) -> Vec<Self> {
        self.legal_moves()
            .into_iter()
            .map(|pos| self.place(pos as usize))
            .collect()
    }

    /// Picks an empty cell directly instead of building every successor.
    fn random_child<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, NodeError> {
        if self.is_done() {
            return Err(NodeError::InvalidState(format!(
                "random_child called on finished board\n{self}"
            )));
        }
        (0..9)
            .filter(|&pos| self.cells[pos] == 0)
            .choose(rng)
            .map(|pos| self.place(pos))
            .ok_or_else(|| NodeError::InvalidState("no empty cell on open board".into()))
    }

    fn is_terminal(&self) -> bool {
        self.is_done()
    }

    fn reward(&self) -> Result<f64, NodeError> {
        if !self.is_done() {
            return Err(NodeError::InvalidState(format!(
                "reward called on nonterminal board\n{self}"
            )));
        }
        // The side to move can never have completed a line on its own turn
        if self.winner == self.turn {
            return Err(NodeError::InvalidState(format!(
                "reward called on unreachable board\n{self}"
            )));
        }
        terminal_reward(self.winner, self.turn)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            let line: String = row
                .iter()
                .map(|&cell| match cell {
                    X => 'X',
                    O => 'O',
                    _ => '.',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
