//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the workspace (currently the `arena` binary).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`NOUGHTS_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults (`config.defaults.toml`, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! NOUGHTS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     NOUGHTS_COMMON_LOG_LEVEL=debug
//!     NOUGHTS_DIFFICULTY_HARD=5000
//!     NOUGHTS_ARENA_MODE=pvc
//!     NOUGHTS_ARENA_SEED=7
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
