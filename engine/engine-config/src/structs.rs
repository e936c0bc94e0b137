//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_easy() -> u32 {
    defaults::easy_iterations()
}
fn d_medium() -> u32 {
    defaults::medium_iterations()
}
fn d_hard() -> u32 {
    defaults::hard_iterations()
}
fn d_mode() -> String {
    defaults::arena_mode().into()
}
fn d_x() -> String {
    defaults::arena_x().into()
}
fn d_o() -> String {
    defaults::arena_o().into()
}
fn d_games() -> u32 {
    defaults::arena_games()
}
fn d_human() -> String {
    defaults::arena_human().into()
}
fn d_seed() -> Option<u64> {
    defaults::arena_seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub difficulty: DifficultyConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Settings shared by every binary
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    /// Fallback tracing filter when RUST_LOG is unset
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

/// Iteration budgets of the AI difficulty tiers
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DifficultyConfig {
    #[serde(default = "d_easy")]
    pub easy: u32,
    #[serde(default = "d_medium")]
    pub medium: u32,
    #[serde(default = "d_hard")]
    pub hard: u32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            easy: defaults::easy_iterations(),
            medium: defaults::medium_iterations(),
            hard: defaults::hard_iterations(),
        }
    }
}

/// Terminal arena settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    /// One of pvp, pvc, cvc, serve
    #[serde(default = "d_mode")]
    pub mode: String,
    /// Difficulty (or "human") for the X side
    #[serde(default = "d_x")]
    pub x: String,
    /// Difficulty (or "human") for the O side
    #[serde(default = "d_o")]
    pub o: String,
    /// Number of games to play in cvc mode
    #[serde(default = "d_games")]
    pub games: u32,
    /// Side the human takes in pvc mode, "x" or "o"
    #[serde(default = "d_human")]
    pub human: String,
    /// Base seed for AI searches (None = entropy)
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            mode: defaults::arena_mode().into(),
            x: defaults::arena_x().into(),
            o: defaults::arena_o().into(),
            games: defaults::arena_games(),
            human: defaults::arena_human().into(),
            seed: defaults::arena_seed(),
        }
    }
}
