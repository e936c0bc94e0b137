//! Default configuration values loaded from config.defaults.toml.
//!
//! The TOML file at the repository root is embedded at compile time, so the
//! documented defaults and the compiled ones cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    difficulty: DifficultyDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct DifficultyDefaults {
    easy: u32,
    medium: u32,
    hard: u32,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    mode: String,
    x: String,
    o: String,
    games: u32,
    human: String,
    #[serde(default)]
    seed: Option<u64>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Difficulty
pub fn easy_iterations() -> u32 {
    DEFAULTS.difficulty.easy
}
pub fn medium_iterations() -> u32 {
    DEFAULTS.difficulty.medium
}
pub fn hard_iterations() -> u32 {
    DEFAULTS.difficulty.hard
}

// Arena
pub fn arena_mode() -> &'static str {
    &DEFAULTS.arena.mode
}
pub fn arena_x() -> &'static str {
    &DEFAULTS.arena.x
}
pub fn arena_o() -> &'static str {
    &DEFAULTS.arena.o
}
pub fn arena_games() -> u32 {
    DEFAULTS.arena.games
}
pub fn arena_human() -> &'static str {
    &DEFAULTS.arena.human
}
pub fn arena_seed() -> Option<u64> {
    DEFAULTS.arena.seed
}
