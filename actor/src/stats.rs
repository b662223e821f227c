//! Game result tracking for the actor.

use std::fmt;
use std::time::Instant;

/// Result of one game, from the searcher's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Classify a tic-tac-toe winner code for the player `side`.
    pub fn for_side(winner: u8, side: u8) -> Self {
        if winner == games_tictactoe::DRAW {
            Outcome::Draw
        } else if winner == side {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Win => "win",
            Outcome::Draw => "draw",
            Outcome::Loss => "loss",
        };
        f.write_str(s)
    }
}

/// Running tally of played games.
#[derive(Debug)]
pub struct GameStats {
    wins: u32,
    draws: u32,
    losses: u32,
    total_plies: u64,
    start_time: Instant,
}

/// Totals at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub avg_game_length: f64,
    pub runtime_seconds: f64,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    pub fn new() -> Self {
        Self {
            wins: 0,
            draws: 0,
            losses: 0,
            total_plies: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a finished game of `plies` moves.
    pub fn record_game(&mut self, outcome: Outcome, plies: u32) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.total_plies += plies as u64;
    }

    pub fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn summary(&self) -> Summary {
        let games = self.games();
        let avg_game_length = if games > 0 {
            self.total_plies as f64 / games as f64
        } else {
            0.0
        };

        Summary {
            games,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            avg_game_length,
            runtime_seconds: self.start_time.elapsed().as_secs_f64(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "games: {}  wins: {}  draws: {}  losses: {}  avg length: {:.1}  time: {:.2}s",
            self.games,
            self.wins,
            self.draws,
            self.losses,
            self.avg_game_length,
            self.runtime_seconds
        )
    }
}
