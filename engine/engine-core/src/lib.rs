//! Core traits and types for the Noughts game engine
//!
//! This crate provides the abstractions the search engine is written against:
//! - `Game`: immutable, value-like position of a two-player, zero-sum,
//!   perfect-information, turn-based game
//! - `Outcome`: terminal classification of a position
//! - `MoveError` / `DecodeError`: failures when applying moves or rebuilding
//!   a position from a wire snapshot
//! - `game_utils`: scoring helpers shared by search and game crates

pub mod game_utils;
pub mod typed;

// Re-export main types for convenience
pub use game_utils::outcome_score;
pub use typed::{DecodeError, Game, MoveError, Outcome};
