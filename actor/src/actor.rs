//! Game loop: the searcher against an opponent, sides alternating per game.

use anyhow::{anyhow, Result};
use engine_core::Node;
use games_tictactoe::{Board, O, X};
use tracing::{debug, info};

use crate::config::{Config, OpponentKind};
use crate::mcts_policy::MctsPolicy;
use crate::policy::{Policy, RandomPolicy};
use crate::stats::{GameStats, Outcome, Summary};

/// Upper bound on plies; a tic-tac-toe game never exceeds nine.
const MAX_PLIES: u32 = 9;

pub struct Actor {
    searcher: MctsPolicy<Board>,
    opponent: Box<dyn Policy<Board>>,
    games: u32,
    log_interval: u32,
    stats: GameStats,
}

/// A finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub searcher_side: u8,
    pub winner: u8,
    pub plies: u32,
    pub final_board: Board,
}

impl Actor {
    pub fn new(config: &Config) -> Result<Self> {
        let seed = config.seed();
        // The opponent gets its own stream so both players differ under one seed
        let opponent_seed = seed.map(|s| s.wrapping_add(1));

        let opponent: Box<dyn Policy<Board>> = match config.opponent_kind()? {
            OpponentKind::Mcts => Box::new(MctsPolicy::new(config.mcts_config(opponent_seed))?),
            OpponentKind::Random => Box::new(RandomPolicy::new(opponent_seed)),
        };

        Ok(Self {
            searcher: MctsPolicy::new(config.mcts_config(seed))?,
            opponent,
            games: config.games,
            log_interval: config.log_interval,
            stats: GameStats::new(),
        })
    }

    /// Play every configured game and return the totals.
    pub fn run(&mut self) -> Result<Summary> {
        for game in 0..self.games {
            let searcher_side = if game % 2 == 0 { X } else { O };
            let record = self.play_game(searcher_side)?;
            let outcome = Outcome::for_side(record.winner, searcher_side);
            self.stats.record_game(outcome, record.plies);

            if self.log_interval > 0 && (game + 1) % self.log_interval == 0 {
                info!(
                    game = game + 1,
                    searcher = side_name(searcher_side),
                    opponent = self.opponent.name(),
                    plies = record.plies,
                    %outcome,
                    "Game finished"
                );
            }
        }

        Ok(self.stats.summary())
    }

    /// Play a single game from the empty board.
    pub fn play_game(&mut self, searcher_side: u8) -> Result<GameRecord> {
        self.searcher.new_game();
        self.opponent.new_game();

        let mut board = Board::new();
        let mut plies = 0;

        while !board.is_terminal() {
            if plies >= MAX_PLIES {
                return Err(anyhow!(
                    "game exceeded {} plies without finishing",
                    MAX_PLIES
                ));
            }

            let mover = board.turn();
            let policy: &mut dyn Policy<Board> = if mover == searcher_side {
                &mut self.searcher
            } else {
                self.opponent.as_mut()
            };

            let next = policy.select_move(&board)?;
            let policy_name = policy.name();
            let cell = board
                .move_to(&next)
                .ok_or_else(|| anyhow!("{} policy returned a non-successor", policy_name))?;

            // Search statistics only exist for the searcher's own moves
            let search = if mover == searcher_side {
                self.searcher.last_search()
            } else {
                None
            };

            debug!(
                ply = plies + 1,
                player = side_name(mover),
                policy = policy_name,
                cell,
                value = search.map(|s| s.value),
                root_visits = search.map(|s| s.root_visits),
                tree_nodes = search.map(|_| self.searcher.tree_size()),
                "Move played"
            );

            board = next;
            plies += 1;
        }

        Ok(GameRecord {
            searcher_side,
            winner: board.winner(),
            plies,
            final_board: board,
        })
    }
}

fn side_name(side: u8) -> &'static str {
    match side {
        X => "X",
        O => "O",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(opponent: &str, games: u32) -> Config {
        Config {
            games,
            rollouts: 200,
            exploration_weight: 1.0,
            seed: Some(42),
            opponent: opponent.into(),
            log_level: "info".into(),
            log_interval: 1,
        }
    }

    #[test]
    fn test_actor_creation() {
        assert!(Actor::new(&test_config("random", 1)).is_ok());
        assert!(Actor::new(&test_config("mcts", 1)).is_ok());
        assert!(Actor::new(&test_config("nobody", 1)).is_err());
    }

    #[test]
    fn test_actor_rejects_unusable_exploration_weight() {
        let mut config = test_config("mcts", 1);
        config.exploration_weight = f64::NAN;
        let err = Actor::new(&config).err().unwrap();
        assert!(err.to_string().contains("exploration_weight"));
    }

    #[test]
    fn test_play_single_game() {
        let mut actor = Actor::new(&test_config("random", 1)).unwrap();
        let record = actor.play_game(X).unwrap();

        assert_eq!(record.searcher_side, X);
        assert!(record.final_board.is_terminal());
        assert!((5..=9).contains(&record.plies));
        assert_eq!(record.plies as usize, record.final_board.moves_played());
        assert_eq!(record.winner, record.final_board.winner());
    }

    #[test]
    fn test_searcher_statistics_follow_its_last_move() {
        let mut actor = Actor::new(&test_config("random", 1)).unwrap();
        let record = actor.play_game(O).unwrap();

        // O always gets at least two moves before the game can end
        let search = actor.searcher.last_search().unwrap();
        assert_eq!(search.rollouts, 200);
        assert!(search.root_visits >= 200);
        assert!((0.0..=1.0).contains(&search.value));
        assert!(actor.searcher.tree_size() > 1);
        assert!(record.final_board.is_terminal());
    }

    #[test]
    fn test_run_counts_every_game() {
        let mut actor = Actor::new(&test_config("mcts", 3)).unwrap();
        let summary = actor.run().unwrap();

        assert_eq!(summary.games, 3);
        assert_eq!(summary.wins + summary.draws + summary.losses, 3);
        assert!(summary.avg_game_length >= 5.0);
    }

    #[test]
    fn test_same_seed_same_games() {
        let mut a = Actor::new(&test_config("random", 1)).unwrap();
        let mut b = Actor::new(&test_config("random", 1)).unwrap();

        assert_eq!(a.play_game(O).unwrap(), b.play_game(O).unwrap());
    }

    #[test]
    fn test_side_name() {
        assert_eq!(side_name(X), "X");
        assert_eq!(side_name(O), "O");
        assert_eq!(side_name(0), "?");
    }
}
