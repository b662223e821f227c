//! Configuration loading logic.
//!
//! Finds a config.toml, parses it over the built-in defaults and applies
//! `UCT_<SECTION>_<KEY>` environment overrides on top.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "UCT_CONFIG";

/// Standard locations to search for config.toml, in order.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// Load the central configuration.
///
/// The file named by `UCT_CONFIG` wins; otherwise the first existing entry of
/// [`CONFIG_SEARCH_PATHS`] is used. Without any file the built-in defaults
/// apply. Environment overrides are applied in every case.
pub fn load_config() -> CentralConfig {
    let base = match locate_config() {
        Some(path) => read_or_default(&path),
        None => {
            debug!("No config.toml found, using built-in defaults");
            CentralConfig::default()
        }
    };
    apply_env_overrides(base)
}

/// Load configuration from a specific path, then apply environment overrides.
///
/// Unreadable or malformed files fall back to the built-in defaults with a
/// warning.
pub fn load_from_path(path: &Path) -> CentralConfig {
    apply_env_overrides(read_or_default(path))
}

fn locate_config() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_PATH_VAR) {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return Some(path);
        }
        warn!(
            path = %path.display(),
            "{} points at a missing file, searching default locations",
            CONFIG_PATH_VAR
        );
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

fn read_or_default(path: &Path) -> CentralConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));

    match parsed {
        Ok(config) => {
            info!(path = %path.display(), "Loaded config");
            config
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "Unusable config file, using built-in defaults");
            CentralConfig::default()
        }
    }
}

/// Value of `key` parsed as `T`. Unset variables and unparseable values
/// yield `None`; the latter are logged.
fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern `UCT_<SECTION>_<KEY>`.
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    if let Some(v) = env_value("UCT_COMMON_LOG_LEVEL") {
        config.common.log_level = v;
    }

    if let Some(v) = env_value("UCT_MCTS_EXPLORATION_WEIGHT") {
        config.mcts.exploration_weight = v;
    }
    if let Some(v) = env_value("UCT_MCTS_NUM_ROLLOUTS") {
        config.mcts.num_rollouts = v;
    }
    if let Some(v) = env_value::<u64>("UCT_MCTS_SEED") {
        config.mcts.seed = Some(v);
    }

    if let Some(v) = env_value("UCT_ACTOR_GAMES") {
        config.actor.games = v;
    }
    if let Some(v) = env_value("UCT_ACTOR_OPPONENT") {
        config.actor.opponent = v;
    }
    if let Some(v) = env_value("UCT_ACTOR_LOG_INTERVAL") {
        config.actor.log_interval = v;
    }

    config
}
