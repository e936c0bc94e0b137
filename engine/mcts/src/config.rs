//! MCTS configuration parameters.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::search::SearchError;

/// UCB1 exploration constant `c = sqrt(2)`.
pub const EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per decision.
    pub iterations: u32,

    /// Exploration constant for UCB1.
    /// Fixed at [`EXPLORATION_CONSTANT`] for play; only benches and tests change it.
    pub exploration: f64,

    /// Seed for the rollout RNG. `None` seeds from OS entropy on every search.
    /// With a seed, a search is a pure function of (state, iterations, seed).
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: EXPLORATION_CONSTANT,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create config with the iteration budget of a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::default().with_iterations(difficulty.iterations())
    }

    /// Create a small, seeded config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            exploration: EXPLORATION_CONSTANT,
            seed: Some(42),
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: fix the rollout seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the config can drive a search.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidConfig(
                "iterations must be greater than 0".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

/// Named iteration budgets offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Default iteration budget for this tier.
    pub fn iterations(self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 500,
            Difficulty::Hard => 2000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}', expected one of easy, medium, hard")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}
