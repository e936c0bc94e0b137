//! MCTS search implementation.
//!
//! Implements the core UCT algorithm:
//! 1. Selection: Descend through fully expanded nodes by UCB1
//! 2. Expansion: Add one child for an untried move
//! 3. Simulation: Evaluate the new leaf with a random rollout
//! 4. Backpropagation: Update statistics along the path to the root

use engine_core::{Game, MoveError};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError, RandomRollout};
use crate::node::NodeId;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search finished without expanding any root move")]
    EmptyTree,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Engine error: {0}")]
    Engine(#[from] MoveError),

    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),
}

/// Result of an MCTS search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// Most visited root move
    pub best_move: M,

    /// Visit count of every expanded root move, in expansion order
    pub visits: Vec<(M, u32)>,

    /// Estimated payoff of `best_move` for the player at the root
    pub win_rate: f64,

    /// Number of iterations performed (root visit count)
    pub iterations: u32,
}

/// MCTS search state.
pub struct MctsSearch<'a, G: Game, E: Evaluator<G>> {
    tree: MctsTree<G>,
    evaluator: &'a E,
    config: MctsConfig,
}

impl<'a, G: Game, E: Evaluator<G>> MctsSearch<'a, G, E> {
    /// Create a new MCTS search from the given position.
    ///
    /// Fails with `NoLegalMoves` if the position is already decided; callers
    /// are expected to check `is_terminal()` first.
    pub fn new(evaluator: &'a E, config: MctsConfig, state: G) -> Result<Self, SearchError> {
        config.validate()?;

        if state.legal_moves().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree: MctsTree::new(state),
            evaluator,
            config,
        })
    }

    /// Run the MCTS search for the configured number of iterations.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<G::Move>, SearchError> {
        for _ in 0..self.config.iterations {
            self.simulate(rng)?;
        }

        let (best_move, _) = self.tree.best_action().ok_or(SearchError::EmptyTree)?;

        let root = self.tree.get(self.tree.root());
        let win_rate = root
            .children
            .iter()
            .find(|(action, _)| *action == best_move)
            .map(|(_, id)| 1.0 - self.tree.get(*id).win_rate())
            .unwrap_or(0.0);

        let stats = self.tree.stats();
        debug!(
            best_move = ?best_move,
            win_rate,
            iterations = stats.root_visits,
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            "MCTS search complete"
        );

        Ok(SearchResult {
            best_move,
            visits: self.tree.root_visits(),
            win_rate,
            iterations: root.visit_count,
        })
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        // Selection: descend to a node with untried moves, or a terminal leaf
        let selected = self.select();

        // Expansion: terminal leaves have nothing to expand
        let leaf_id = self.tree.expand(selected)?.unwrap_or(selected);

        // Simulation
        let result = self
            .evaluator
            .evaluate(&self.tree.get(leaf_id).state, rng)?;

        // Backpropagation
        self.tree.backpropagate(leaf_id, result);

        trace!(
            leaf = leaf_id.0,
            expanded = leaf_id != selected,
            result,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Select a node by descending from the root using UCB1.
    ///
    /// Stops at the first node that still has untried moves or has no
    /// children at all (a terminal position).
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if !node.is_fully_expanded() || node.children.is_empty() {
                return current;
            }

            match self.tree.select_child(current, self.config.exploration) {
                Some(child_id) => current = child_id,
                None => return current,
            }
        }
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G> {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G: Game, E: Evaluator<G>>(
    evaluator: &E,
    config: MctsConfig,
    state: G,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::Move>, SearchError> {
    let mut search = MctsSearch::new(evaluator, config, state)?;
    search.run(rng)
}

/// Move-picking agent.
///
/// Builds a fresh tree for every decision and discards it afterwards. Each
/// search gets its own RNG, seeded from the config or from OS entropy, so
/// agents can be shared across threads without sharing random state.
#[derive(Debug, Clone)]
pub struct MctsAgent<E = RandomRollout> {
    config: MctsConfig,
    evaluator: E,
}

impl MctsAgent<RandomRollout> {
    /// Create an agent that evaluates leaves with random rollouts.
    pub fn new(config: MctsConfig) -> Self {
        Self::with_evaluator(config, RandomRollout)
    }
}

impl<E> MctsAgent<E> {
    /// Create an agent with a custom leaf evaluator.
    pub fn with_evaluator(config: MctsConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run a full search and return its statistics.
    pub fn search<G>(&self, state: &G) -> Result<SearchResult<G::Move>, SearchError>
    where
        G: Game,
        E: Evaluator<G>,
    {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        run_mcts(&self.evaluator, self.config.clone(), state.clone(), &mut rng)
    }

    /// Pick the most visited move after `iterations` simulations.
    pub fn find_best_move<G>(&self, state: &G) -> Result<G::Move, SearchError>
    where
        G: Game,
        E: Evaluator<G>,
    {
        self.search(state).map(|result| result.best_move)
    }
}
