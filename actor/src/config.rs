//! Configuration for the actor
//!
//! Defaults come from the central config (config.toml plus `UCT_*`
//! environment overrides). CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use engine_config::{load_config, CentralConfig};

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

/// Opponent names accepted by `--opponent`.
pub const OPPONENTS: [&str; 2] = ["mcts", "random"];

fn default_games() -> u32 {
    CENTRAL_CONFIG.actor.games
}

fn default_rollouts() -> u32 {
    CENTRAL_CONFIG.mcts.num_rollouts
}

fn default_exploration_weight() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_weight
}

fn default_opponent() -> String {
    CENTRAL_CONFIG.actor.opponent.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}

/// Who the searcher plays against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentKind {
    /// A second, independently seeded searcher
    Mcts,
    /// Uniformly random legal moves
    Random,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "actor")]
#[command(about = "Play tic-tac-toe games with a UCT Monte Carlo tree searcher")]
#[command(
    long_about = "Plays full tic-tac-toe games: the searcher runs a fixed number of
random-playout rollouts before each of its moves. Sides alternate between games.

Configuration is loaded from config.toml with UCT_* environment variable
overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Rollouts per searcher move
    #[arg(long, default_value_t = default_rollouts())]
    pub rollouts: u32,

    /// UCT exploration weight
    #[arg(long, default_value_t = default_exploration_weight())]
    pub exploration_weight: f64,

    /// Seed for reproducible games (random if unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Opponent: mcts or random
    #[arg(long, default_value_t = default_opponent())]
    pub opponent: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log a result line every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.rollouts == 0 {
            return Err(anyhow!("rollouts must be greater than 0"));
        }

        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(anyhow!(
                "exploration_weight must be a finite non-negative number, got {}",
                self.exploration_weight
            ));
        }

        self.opponent_kind()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Seed from the command line, falling back to the central config.
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }

    pub fn opponent_kind(&self) -> Result<OpponentKind> {
        match self.opponent.to_ascii_lowercase().as_str() {
            "mcts" => Ok(OpponentKind::Mcts),
            "random" => Ok(OpponentKind::Random),
            other => Err(anyhow!(
                "unknown opponent '{}', expected one of {}",
                other,
                OPPONENTS.join(", ")
            )),
        }
    }

    /// Search settings for the searcher seeded with `seed`.
    pub fn mcts_config(&self, seed: Option<u64>) -> mcts::MctsConfig {
        let config = mcts::MctsConfig::default()
            .with_exploration_weight(self.exploration_weight)
            .with_rollouts(self.rollouts);
        match seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
