//! Configuration for the arena binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig, DifficultyConfig};
use games_tictactoe::Mark;
use mcts::Difficulty;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_mode() -> String {
    CENTRAL_CONFIG.arena.mode.clone()
}

fn default_x() -> String {
    CENTRAL_CONFIG.arena.x.clone()
}

fn default_o() -> String {
    CENTRAL_CONFIG.arena.o.clone()
}

fn default_human() -> String {
    CENTRAL_CONFIG.arena.human.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_seed() -> Option<u64> {
    CENTRAL_CONFIG.arena.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_budgets() -> DifficultyConfig {
    CENTRAL_CONFIG.difficulty.clone()
}

/// What the arena does once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Two humans sharing the terminal
    Pvp,
    /// Human against the AI
    Pvc,
    /// AI against AI, optionally over many games
    Cvc,
    /// JSON-lines search requests on stdin, replies on stdout
    Serve,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" => Ok(Mode::Pvp),
            "pvc" => Ok(Mode::Pvc),
            "cvc" => Ok(Mode::Cvc),
            "serve" => Ok(Mode::Serve),
            other => Err(anyhow!(
                "invalid mode '{}', expected one of pvp, pvc, cvc, serve",
                other
            )),
        }
    }
}

/// Who makes the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Human,
    Agent(Difficulty),
}

impl FromStr for Player {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("human") {
            return Ok(Player::Human);
        }
        s.parse::<Difficulty>()
            .map(Player::Agent)
            .map_err(|e| anyhow!("invalid player '{}': {}, or human", s, e))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => f.write_str("human"),
            Player::Agent(difficulty) => write!(f, "AI ({})", difficulty),
        }
    }
}

/// The players seated at X and O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seats {
    pub x: Player,
    pub o: Player,
}

impl Seats {
    pub fn get(&self, mark: Mark) -> Player {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Noughts arena - play tic-tac-toe against MCTS agents")]
#[command(
    long_about = "Terminal tic-tac-toe with Monte Carlo Tree Search players.

Modes: pvp (two humans), pvc (human vs AI), cvc (AI vs AI, batch with --games),
serve (JSON-lines search requests on stdin).

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Mode to run (pvp, pvc, cvc, serve)
    #[arg(long, default_value_t = default_mode())]
    pub mode: String,

    /// Player for X: human, easy, medium or hard
    #[arg(short = 'x', long = "x", default_value_t = default_x())]
    pub x: String,

    /// Player for O: human, easy, medium or hard
    #[arg(short = 'o', long = "o", default_value_t = default_o())]
    pub o: String,

    /// Side the human plays in pvc mode (x or o)
    #[arg(long, default_value_t = default_human())]
    pub human: String,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Base RNG seed for AI searches (omit for entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Iteration budgets per difficulty tier (config file only)
    #[arg(skip = default_budgets())]
    pub budgets: DifficultyConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.mode()?;
        self.x.parse::<Player>()?;
        self.o.parse::<Player>()?;
        self.human_mark()?;

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.budgets.easy == 0 || self.budgets.medium == 0 || self.budgets.hard == 0 {
            return Err(anyhow!("difficulty iteration budgets must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn mode(&self) -> Result<Mode> {
        self.mode.parse()
    }

    /// RNG seed for searches: the flag, else the config file.
    pub fn seed(&self) -> Option<u64> {
        self.seed.or_else(default_seed)
    }

    fn human_mark(&self) -> Result<Mark> {
        match self.human.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            other => Err(anyhow!("invalid human side '{}', expected x or o", other)),
        }
    }

    /// Resolve who plays each side for a game mode.
    ///
    /// pvp seats two humans, pvc seats the human on `--human` and keeps the
    /// configured AI on the other side, cvc requires two AIs.
    pub fn seats(&self, mode: Mode) -> Result<Seats> {
        let x: Player = self.x.parse()?;
        let o: Player = self.o.parse()?;

        match mode {
            Mode::Pvp => Ok(Seats {
                x: Player::Human,
                o: Player::Human,
            }),
            Mode::Pvc => {
                let (human, ai) = match self.human_mark()? {
                    Mark::X => (Mark::X, o),
                    Mark::O => (Mark::O, x),
                };
                if ai == Player::Human {
                    return Err(anyhow!(
                        "pvc needs a difficulty for the AI side, got human"
                    ));
                }
                Ok(match human {
                    Mark::X => Seats { x: Player::Human, o: ai },
                    Mark::O => Seats { x: ai, o: Player::Human },
                })
            }
            Mode::Cvc => {
                if x == Player::Human || o == Player::Human {
                    return Err(anyhow!("cvc needs a difficulty for both sides"));
                }
                Ok(Seats { x, o })
            }
            Mode::Serve => Err(anyhow!("serve mode has no seats")),
        }
    }
}

/// Iteration budget for a difficulty tier.
pub fn iterations_for(budgets: &DifficultyConfig, difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => budgets.easy,
        Difficulty::Medium => budgets.medium,
        Difficulty::Hard => budgets.hard,
    }
}
