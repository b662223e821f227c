//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across all Rust components (search engine, actor).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`UCT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! UCT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     UCT_COMMON_LOG_LEVEL=debug
//!     UCT_MCTS_EXPLORATION_WEIGHT=1.4
//!     UCT_MCTS_NUM_ROLLOUTS=5000
//!     UCT_MCTS_SEED=7
//!     UCT_ACTOR_GAMES=100
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
