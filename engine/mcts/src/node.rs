//! MCTS tree node representation.
//!
//! Each node holds the position reached by taking `action` from the parent,
//! the moves not yet expanded from it, and the visit statistics used for
//! UCB1 selection.

use engine_core::Game;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<G: Game> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub action: Option<G::Move>,

    /// Position at this node
    pub state: G,

    /// Legal moves not yet expanded into children.
    /// Filled once from `state.legal_moves()` and only ever shrinks.
    pub untried_moves: Vec<G::Move>,

    /// Children: (move, NodeId) pairs in expansion order.
    pub children: Vec<(G::Move, NodeId)>,

    /// Number of simulations backpropagated through this node
    pub visit_count: u32,

    /// Sum of simulation results credited to this node.
    ///
    /// Results are stored for the player to move at this node, so the
    /// parent (whose opponent that is) scores the child by `1 - win_rate`.
    pub win_score: f64,
}

impl<G: Game> MctsNode<G> {
    /// Create a new root node.
    pub fn new_root(state: G) -> Self {
        Self::new_child(NodeId::NONE, None, state)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: Option<G::Move>, state: G) -> Self {
        let untried_moves = state.legal_moves();
        Self {
            parent,
            action,
            state,
            untried_moves,
            children: Vec::new(),
            visit_count: 0,
            win_score: 0.0,
        }
    }

    /// Mean result `win_score / visit_count`. Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_score / self.visit_count as f64
        }
    }

    /// Calculate UCB1 score for selecting this node from its parent.
    ///
    /// `UCB1 = (1 - win_rate) + c * sqrt(ln(N_parent) / N)`
    ///
    /// Unvisited nodes score +infinity so every child is tried once before
    /// any is revisited.
    ///
    /// Note: takes pre-computed ln(parent_visits) so it is evaluated once
    /// per selection step rather than once per child.
    #[inline]
    pub fn ucb_score(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let visits = self.visit_count as f64;
        // The parent moves into this node, so its payoff is the complement
        let exploitation = 1.0 - self.win_score / visits;
        let exploration = exploration * (ln_parent_visits / visits).sqrt();
        exploitation + exploration
    }

    /// True once every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// True for positions with a decided outcome.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::State;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(State::initial());

        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.visit_count, 0);
        assert!(node.children.is_empty());
        assert_eq!(node.untried_moves, (0..9).collect::<Vec<u8>>());
        assert!(!node.is_fully_expanded());
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_win_rate() {
        let mut node = MctsNode::new_root(State::initial());

        // Unvisited
        assert!(node.win_rate().abs() < 1e-12);

        node.visit_count = 4;
        node.win_score = 1.0;
        assert!((node.win_rate() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ucb_score_unvisited_is_infinite() {
        let node = MctsNode::new_root(State::initial());
        assert_eq!(node.ucb_score(3.0, 1.4), f64::INFINITY);
    }

    #[test]
    fn test_ucb_score() {
        let mut node = MctsNode::new_root(State::initial());
        node.visit_count = 10;
        node.win_score = 2.5; // win rate 0.25 for the player to move here

        let c = 2f64.sqrt();
        let parent_visits = 100u32;

        // UCB = (1 - 0.25) + sqrt(2) * sqrt(ln(100) / 10)
        let expected = 0.75 + c * ((100f64).ln() / 10.0).sqrt();
        let ucb = node.ucb_score((parent_visits as f64).ln(), c);
        assert!((ucb - expected).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_node_has_no_untried_moves() {
        let mut state = State::initial();
        for mv in [0u8, 3, 1, 4, 2] {
            state = state.apply_move(mv).unwrap();
        }
        let node = MctsNode::new_root(state);
        assert!(node.is_terminal());
        assert!(node.is_fully_expanded());
    }
}
