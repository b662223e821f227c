//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_exploration_weight() -> f64 {
    defaults::exploration_weight()
}
fn d_num_rollouts() -> u32 {
    defaults::num_rollouts()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_opponent() -> String {
    defaults::opponent().into()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search engine configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Weight C of the UCT exploration term
    #[serde(default = "d_exploration_weight")]
    pub exploration_weight: f64,
    /// Rollouts per move choice
    #[serde(default = "d_num_rollouts")]
    pub num_rollouts: u32,
    /// RNG seed; `None` seeds from entropy
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_weight: defaults::exploration_weight(),
            num_rollouts: defaults::num_rollouts(),
            seed: defaults::seed(),
        }
    }
}

/// Actor (game-playing loop) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_opponent")]
    pub opponent: String,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            opponent: defaults::opponent().into(),
            log_interval: defaults::log_interval(),
        }
    }
}
