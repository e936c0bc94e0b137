//! Match statistics for batches of arena games.
//!
//! Tracks outcomes, game lengths and search counts so a cvc batch can report
//! win/draw tallies when it finishes.

use std::time::Instant;

use games_tictactoe::{Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Running tallies for a series of games.
#[derive(Debug)]
pub struct MatchStats {
    games: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    /// Sum of game lengths for average calculation
    total_moves: u64,
    /// AI searches performed across all games
    searches: u64,
    start_time: Instant,
}

/// Serializable stats for the end-of-batch summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatsSnapshot {
    pub games: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub avg_game_length: f64,
    pub searches: u64,
    pub games_per_second: f64,
    pub runtime_seconds: f64,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStats {
    pub fn new() -> Self {
        Self {
            games: 0,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            total_moves: 0,
            searches: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a finished game. Undecided outcomes are ignored.
    pub fn record_game(&mut self, outcome: Outcome, moves: u32) {
        match outcome {
            Outcome::Win(Mark::X) => self.x_wins += 1,
            Outcome::Win(Mark::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Undecided => return,
        }
        self.games += 1;
        self.total_moves += moves as u64;
    }

    pub fn record_searches(&mut self, searches: u64) {
        self.searches += searches;
    }

    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let runtime = self.start_time.elapsed().as_secs_f64();

        let avg_game_length = if self.games > 0 {
            self.total_moves as f64 / self.games as f64
        } else {
            0.0
        };

        let games_per_second = if runtime > 0.0 {
            self.games as f64 / runtime
        } else {
            0.0
        };

        MatchStatsSnapshot {
            games: self.games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            avg_game_length,
            searches: self.searches,
            games_per_second,
            runtime_seconds: runtime,
        }
    }

    pub fn log_summary(&self) {
        let s = self.snapshot();
        info!(
            games = s.games,
            x_wins = s.x_wins,
            o_wins = s.o_wins,
            draws = s.draws,
            avg_game_length = format!("{:.2}", s.avg_game_length),
            searches = s.searches,
            runtime_seconds = format!("{:.2}", s.runtime_seconds),
            "Match summary"
        );
    }
}

impl MatchStatsSnapshot {
    /// One-line human summary for the terminal.
    pub fn summary_line(&self) -> String {
        format!(
            "{} games: X won {}, O won {}, {} drawn ({:.1} moves per game)",
            self.games, self.x_wins, self.o_wins, self.draws, self.avg_game_length
        )
    }
}
