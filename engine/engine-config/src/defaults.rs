//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so every binary agrees on
//! the same values without shipping the file.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(parse_defaults);

/// The file is compiled in, so a parse failure is a build defect.
fn parse_defaults() -> DefaultsConfig {
    match toml::from_str(DEFAULTS_TOML) {
        Ok(defaults) => defaults,
        Err(e) => panic!("embedded config.defaults.toml is invalid: {e}"),
    }
}

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration_weight: f64,
    num_rollouts: u32,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    games: u32,
    opponent: String,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn exploration_weight() -> f64 {
    DEFAULTS.mcts.exploration_weight
}
pub fn num_rollouts() -> u32 {
    DEFAULTS.mcts.num_rollouts
}
pub fn seed() -> Option<u64> {
    DEFAULTS.mcts.seed
}

// Actor
pub fn games() -> u32 {
    DEFAULTS.actor.games
}
pub fn opponent() -> &'static str {
    &DEFAULTS.actor.opponent
}
pub fn log_interval() -> u32 {
    DEFAULTS.actor.log_interval
}
