//! Evaluator trait for leaf evaluation.
//!
//! The evaluator turns a freshly selected or expanded leaf into a scalar
//! result for backpropagation. The engine ships one implementation,
//! [`RandomRollout`], which plays uniformly random moves to the end of the
//! game.

use engine_core::{outcome_score, Game, MoveError};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Rollout produced an illegal move: {0}")]
    IllegalMove(#[from] MoveError),

    #[error("Rollout reached an undecided position with no legal moves")]
    Stalled,
}

/// Trait for leaf evaluators.
///
/// The returned value is scored for the player who moved INTO `state`
/// (the opponent of `state.player_to_move()`): 1.0 for a win, 0.5 for a
/// draw, 0.0 for a loss.
pub trait Evaluator<G: Game>: Send + Sync {
    /// Evaluate a single position.
    fn evaluate(&self, state: &G, rng: &mut ChaCha20Rng) -> Result<f64, EvaluatorError>;
}

/// Random rollout evaluator that plays uniformly random moves to a terminal state.
///
/// There is no length cap: games implementing [`Game`] must end. A position
/// that is undecided yet has no legal moves is reported as
/// [`EvaluatorError::Stalled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl<G: Game> Evaluator<G> for RandomRollout {
    fn evaluate(&self, state: &G, rng: &mut ChaCha20Rng) -> Result<f64, EvaluatorError> {
        let leaf_player = state.player_to_move();
        let mut current = state.clone();

        loop {
            if let Some(score) = outcome_score(&current.outcome(), &leaf_player) {
                // Complement: the result belongs to whoever moved into the leaf
                return Ok(1.0 - score);
            }

            let moves = current.legal_moves();
            if moves.is_empty() {
                return Err(EvaluatorError::Stalled);
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            current = current.apply_move(mv)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::{Cell, Mark, State};
    use rand::SeedableRng;

    fn state_from(cells: [Cell; 9], to_move: Mark) -> State {
        State::new(cells, to_move)
    }

    #[test]
    fn test_rollout_on_won_position() {
        use Cell::{Empty as E, O, X};
        // X just completed the top row; O is to move
        let state = state_from([X, X, X, O, O, E, E, E, E], Mark::O);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let value = RandomRollout.evaluate(&state, &mut rng).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rollout_on_drawn_position() {
        use Cell::{O, X};
        let state = state_from([X, O, X, O, X, O, O, X, O], Mark::X);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let value = RandomRollout.evaluate(&state, &mut rng).unwrap();
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rollout_forced_loss_for_mover() {
        use Cell::{Empty as E, O, X};
        // O moved into this position but X wins with the only remaining move
        // X X _ / O O X / O X O
        let state = state_from([X, X, E, O, O, X, O, X, O], Mark::X);
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let value = RandomRollout.evaluate(&state, &mut rng).unwrap();
        assert!(value.abs() < 1e-12);
    }

    #[test]
    fn test_rollout_is_reproducible_with_seed() {
        let evaluator = RandomRollout;
        let state = State::initial();

        let a: Vec<f64> = {
            let mut rng = ChaCha20Rng::seed_from_u64(99);
            (0..20)
                .map(|_| evaluator.evaluate(&state, &mut rng).unwrap())
                .collect()
        };
        let b: Vec<f64> = {
            let mut rng = ChaCha20Rng::seed_from_u64(99);
            (0..20)
                .map(|_| evaluator.evaluate(&state, &mut rng).unwrap())
                .collect()
        };
        assert_eq!(a, b);
        assert!(a.iter().all(|v| [0.0, 0.5, 1.0].contains(v)));
    }

    #[test]
    fn test_rollout_from_empty_board_reaches_the_end() {
        let state = State::initial();
        for seed in 0..50 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let value = RandomRollout.evaluate(&state, &mut rng).unwrap();
            assert!([0.0, 0.5, 1.0].contains(&value));
        }
    }

    /// A broken game that never ends and never offers a move.
    #[derive(Debug, Clone)]
    struct Stuck;

    impl Game for Stuck {
        type Move = u8;
        type Player = u8;
        type Snapshot = u8;

        fn player_to_move(&self) -> u8 {
            0
        }

        fn legal_moves(&self) -> Vec<u8> {
            Vec::new()
        }

        fn apply_move(&self, mv: u8) -> Result<Self, MoveError> {
            Err(MoveError::OutOfRange {
                index: mv as usize,
                len: 0,
            })
        }

        fn outcome(&self) -> engine_core::Outcome<u8> {
            engine_core::Outcome::Undecided
        }

        fn snapshot(&self) -> u8 {
            0
        }

        fn from_snapshot(_: &u8) -> Result<Self, engine_core::DecodeError> {
            Ok(Stuck)
        }
    }

    #[test]
    fn test_undecided_dead_end_is_an_error() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let result = RandomRollout.evaluate(&Stuck, &mut rng);
        assert!(matches!(result, Err(EvaluatorError::Stalled)));
    }
}
