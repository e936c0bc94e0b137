//! Shared utilities for two-player game implementations
//!
//! Scoring used by rollouts and by callers that tally finished games.

use crate::typed::Outcome;

/// Score a finished game from one player's point of view.
///
/// # Returns
/// * `Some(1.0)` if `player` won
/// * `Some(0.5)` for a draw
/// * `Some(0.0)` if the opponent won
/// * `None` while the game is still undecided
///
/// # Example
/// ```
/// use engine_core::{outcome_score, Outcome};
///
/// assert_eq!(outcome_score(&Outcome::Win('X'), &'X'), Some(1.0));
/// assert_eq!(outcome_score(&Outcome::Win('X'), &'O'), Some(0.0));
/// assert_eq!(outcome_score(&Outcome::<char>::Draw, &'O'), Some(0.5));
/// assert_eq!(outcome_score(&Outcome::<char>::Undecided, &'O'), None);
/// ```
#[inline]
pub fn outcome_score<P: PartialEq>(outcome: &Outcome<P>, player: &P) -> Option<f64> {
    match outcome {
        Outcome::Win(winner) if winner == player => Some(1.0),
        Outcome::Win(_) => Some(0.0),
        Outcome::Draw => Some(0.5),
        Outcome::Undecided => None,
    }
}
