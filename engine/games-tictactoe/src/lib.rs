//! TicTacToe game implementation for the Noughts engine
//!
//! This crate provides the 3x3 tic-tac-toe position used by the MCTS agent.
//! A [`State`] is an immutable value: applying a move returns a new state
//! and the outcome is always recomputed from the cells.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Outcome};
//! use games_tictactoe::{Mark, State};
//!
//! let state = State::initial();
//! assert_eq!(state.legal_moves().len(), 9);
//!
//! let state = state.apply_move(4).unwrap(); // X takes the centre
//! assert_eq!(state.player_to_move(), Mark::O);
//! assert_eq!(state.outcome(), Outcome::Undecided);
//! ```

use engine_core::typed::{DecodeError, Game, MoveError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board
pub const BOARD_SIZE: usize = 9;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other player
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Contents of one board cell
///
/// Serialized as `" "`, `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(rename = " ")]
    Empty,
    X,
    O,
}

impl Cell {
    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

/// Terminal classification of a tic-tac-toe board
pub type Outcome = engine_core::Outcome<Mark>;

/// Classify a board by line check.
///
/// A line of three equal marks wins; otherwise a full board is a draw and
/// anything else is undecided.
pub fn compute_outcome(cells: &[Cell; BOARD_SIZE]) -> Outcome {
    for line in &LINES {
        let [a, b, c] = *line;
        if let Some(mark) = cells[a].mark() {
            if cells[a] == cells[b] && cells[b] == cells[c] {
                return Outcome::Win(mark);
            }
        }
    }

    if cells.iter().all(|&cell| cell != Cell::Empty) {
        return Outcome::Draw;
    }

    Outcome::Undecided
}

/// TicTacToe game state
///
/// The outcome is derived from `cells` on construction and can never be set
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    cells: [Cell; BOARD_SIZE],
    player_to_move: Mark,
    outcome: Outcome,
}

impl State {
    /// Create a state from board contents and the side to move
    pub fn new(cells: [Cell; BOARD_SIZE], player_to_move: Mark) -> Self {
        Self {
            cells,
            player_to_move,
            outcome: compute_outcome(&cells),
        }
    }

    /// Empty board with X to move
    pub fn initial() -> Self {
        Self::new([Cell::Empty; BOARD_SIZE], Mark::X)
    }

    /// Board contents in index order 0-8
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn moves_played(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "---+---+---")?;
            }
            let symbols: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell.mark() {
                    Some(mark) => mark.to_string(),
                    None => (row * 3 + col).to_string(),
                })
                .collect();
            write!(f, " {} | {} | {} ", symbols[0], symbols[1], symbols[2])?;
        }
        Ok(())
    }
}

/// Plain-data form of a [`State`] for crossing a thread or process boundary
///
/// On the wire: `{"board": [" ", "X", ...], "playerToMove": "O"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub board: Vec<Cell>,
    pub player_to_move: Mark,
}

impl Game for State {
    type Move = u8;
    type Player = Mark;
    type Snapshot = Snapshot;

    fn player_to_move(&self) -> Mark {
        self.player_to_move
    }

    fn legal_moves(&self) -> Vec<u8> {
        if self.outcome.is_decided() {
            return Vec::new();
        }

        (0..BOARD_SIZE as u8)
            .filter(|&pos| self.cells[pos as usize] == Cell::Empty)
            .collect()
    }

    fn apply_move(&self, position: u8) -> Result<Self, MoveError> {
        let index = position as usize;
        if index >= BOARD_SIZE {
            return Err(MoveError::OutOfRange {
                index,
                len: BOARD_SIZE,
            });
        }
        if self.cells[index] != Cell::Empty {
            return Err(MoveError::Occupied { index });
        }

        let mut cells = self.cells;
        cells[index] = self.player_to_move.into();

        // The side to move flips even on the move that ends the game
        Ok(State::new(cells, self.player_to_move.opponent()))
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.cells.to_vec(),
            player_to_move: self.player_to_move,
        }
    }

    fn from_snapshot(snapshot: &Snapshot) -> Result<Self, DecodeError> {
        let cells: [Cell; BOARD_SIZE] =
            snapshot
                .board
                .as_slice()
                .try_into()
                .map_err(|_| DecodeError::InvalidLength {
                    expected: BOARD_SIZE,
                    actual: snapshot.board.len(),
                })?;

        Ok(State::new(cells, snapshot.player_to_move))
    }
}
