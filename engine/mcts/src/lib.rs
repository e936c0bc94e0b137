//! Monte Carlo Tree Search (UCT) with random rollouts.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`Game`](engine_core::Game) trait.
//!
//! # Overview
//!
//! Each iteration of the search runs four phases:
//!
//! 1. **Selection**: Descend through fully expanded nodes by UCB1
//! 2. **Expansion**: Add one child for an untried move
//! 3. **Simulation**: Play random moves from the new leaf to the end of the game
//! 4. **Backpropagation**: Update visit counts and scores along the path to the
//!    root, flipping perspective at every level
//!
//! After the budget is spent the most visited root move is played.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::State;
//! use mcts::{Difficulty, MctsAgent, MctsConfig};
//!
//! let config = MctsConfig::for_difficulty(Difficulty::Easy).with_seed(42);
//! let agent = MctsAgent::new(config);
//!
//! let state = State::initial();
//! let best = agent.find_best_move(&state).unwrap();
//! assert!(state.legal_moves().contains(&best));
//! ```
//!
//! # Off-thread search
//!
//! [`SearchWorker`] runs searches on a dedicated thread and answers through a
//! oneshot channel, so an async caller stays responsive:
//!
//! ```text
//! caller task ──SearchRequest──▶ mpsc(1) ──▶ mcts-worker thread
//!      ▲                                          │
//!      └────────── oneshot SearchResponse ◀───────┘
//! ```

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;
pub mod worker;

// Re-export main types
pub use config::{Difficulty, MctsConfig, ParseDifficultyError, EXPLORATION_CONSTANT};
pub use evaluator::{Evaluator, EvaluatorError, RandomRollout};
pub use node::{MctsNode, NodeId};
pub use search::{run_mcts, MctsAgent, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
pub use worker::{
    handle_json_line, run_request, SearchReply, SearchRequest, SearchResponse, SearchWorker,
    WorkerError,
};
