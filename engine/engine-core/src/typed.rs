//! Typed Game trait for positions the search engine can explore
//!
//! A `Game` value is a complete position: whose turn it is, the board
//! contents, and the terminal outcome if any. Positions are immutable;
//! applying a move produces a new value and leaves the original untouched.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Terminal classification of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<P> {
    /// The game is still in progress
    Undecided,
    /// The given player completed a winning pattern
    Win(P),
    /// No moves remain and nobody won
    Draw,
}

impl<P> Outcome<P> {
    /// True for every outcome except `Undecided`.
    #[inline]
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }
}

/// Main trait for game positions
///
/// Implementations must keep `outcome` a pure function of the board
/// contents, and must return no legal moves once the outcome is decided.
///
/// # Type Parameters
///
/// * `Move` - Small, copyable move identifier (a board index for grid games)
/// * `Player` - Side to move
/// * `Snapshot` - Plain-data form of a position for crossing a thread or
///   process boundary; the outcome is never part of it
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use serde::{Deserialize, Serialize};
/// #[derive(Debug, Clone)]
/// struct Nim {
///     stones: u8,
///     to_move: u8,
/// }
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct NimSnapshot {
///     stones: u8,
///     to_move: u8,
/// }
///
/// impl Game for Nim {
///     type Move = u8;
///     type Player = u8;
///     type Snapshot = NimSnapshot;
///
///     fn player_to_move(&self) -> u8 { self.to_move }
///     fn legal_moves(&self) -> Vec<u8> { (1..=self.stones.min(3)).collect() }
///     fn apply_move(&self, take: u8) -> Result<Self, MoveError> {
///         if take == 0 || take > self.stones.min(3) {
///             return Err(MoveError::OutOfRange { index: take as usize, len: 3 });
///         }
///         Ok(Nim { stones: self.stones - take, to_move: 1 - self.to_move })
///     }
///     fn outcome(&self) -> Outcome<u8> {
///         // Whoever took the last stone wins
///         if self.stones == 0 { Outcome::Win(1 - self.to_move) } else { Outcome::Undecided }
///     }
///     fn snapshot(&self) -> NimSnapshot {
///         NimSnapshot { stones: self.stones, to_move: self.to_move }
///     }
///     fn from_snapshot(s: &NimSnapshot) -> Result<Self, DecodeError> {
///         Ok(Nim { stones: s.stones, to_move: s.to_move })
///     }
/// }
///
/// let start = Nim { stones: 2, to_move: 0 };
/// let end = start.apply_move(2).unwrap();
/// assert!(end.is_terminal());
/// assert!(end.legal_moves().is_empty());
/// assert_eq!(end.outcome(), Outcome::Win(0));
/// ```
pub trait Game: Clone + Debug + Send + Sync + 'static {
    /// Move identifier
    type Move: Copy + Eq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Side to move
    type Player: Copy + Eq + Debug + Send + Sync + 'static;

    /// Serializable position without the derived outcome
    type Snapshot: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Player whose turn it is.
    fn player_to_move(&self) -> Self::Player;

    /// Every legal move in a fixed, deterministic order.
    ///
    /// Empty once `outcome()` is decided.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Return the position after `mv`, without modifying `self`.
    fn apply_move(&self, mv: Self::Move) -> Result<Self, MoveError>;

    /// Terminal classification of this position.
    fn outcome(&self) -> Outcome<Self::Player>;

    /// True iff the outcome is decided.
    fn is_terminal(&self) -> bool {
        self.outcome().is_decided()
    }

    /// Capture the position as plain data.
    fn snapshot(&self) -> Self::Snapshot;

    /// Rebuild a position from plain data, recomputing any derived fields.
    fn from_snapshot(snapshot: &Self::Snapshot) -> Result<Self, DecodeError>;
}

/// Error type for move application
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Move {index} is out of range (board has {len} cells)")]
    OutOfRange { index: usize, len: usize },
    #[error("Cell {index} is already occupied")]
    Occupied { index: usize },
}

/// Error type for rebuilding a position from a snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid board length: expected {expected} but got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Corrupted data: {0}")]
    CorruptedData(String),
}
