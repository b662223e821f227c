//! Actor - plays tic-tac-toe with the UCT searcher
//!
//! A short-lived process that:
//! 1. Loads settings from config.toml, `UCT_*` environment variables and flags
//! 2. Plays the configured number of games, searcher against an opponent
//! 3. Logs every game and prints a win/draw/loss summary

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod actor;
mod config;
mod mcts_policy;
mod policy;
mod stats;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(
        games = config.games,
        rollouts = config.rollouts,
        exploration_weight = config.exploration_weight,
        seed = ?config.seed(),
        opponent = %config.opponent,
        "Actor starting"
    );

    let mut actor = Actor::new(&config)?;

    match actor.run() {
        Ok(summary) => {
            info!(
                wins = summary.wins,
                draws = summary.draws,
                losses = summary.losses,
                "Actor completed successfully"
            );
            println!("{summary}");
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {}", e);
            Err(e)
        }
    }
}
