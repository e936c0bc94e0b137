//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices; parent links are plain indices, so the
//! whole tree is dropped as one unit when the search finishes.

use engine_core::{Game, MoveError};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<G: Game> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<G>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<G: Game> MctsTree<G> {
    /// Create a new tree rooted at the given position.
    pub fn new(root_state: G) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<G> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<G>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<G>] {
        &self.nodes
    }

    /// Select the child of a node with the highest UCB1 score.
    ///
    /// Ties go to the first maximal child in expansion order.
    /// Returns None if the node has no children.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let ln_parent_visits = (node.visit_count as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &(_, child_id) in &node.children {
            let score = self.get(child_id).ucb_score(ln_parent_visits, exploration);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, action: G::Move, state: G) -> NodeId {
        let child = MctsNode::new_child(parent_id, Some(action), state);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Expand one untried move of a node.
    ///
    /// Pops the last untried move, applies it and links the resulting child.
    /// Returns None when the node has nothing left to expand.
    pub fn expand(&mut self, node_id: NodeId) -> Result<Option<NodeId>, MoveError> {
        let node = self.get_mut(node_id);
        let Some(action) = node.untried_moves.pop() else {
            return Ok(None);
        };
        let child_state = node.state.apply_move(action)?;
        Ok(Some(self.add_child(node_id, action, child_state)))
    }

    /// Backpropagate a simulation result from a leaf to the root.
    ///
    /// `result` is scored for the player who moved into the leaf. Every node
    /// on the path, the root included, flips it before accumulating, so each
    /// node's `win_score` credits the player to move at that node.
    pub fn backpropagate(&mut self, leaf_id: NodeId, result: f64) {
        let mut current_id = leaf_id;
        let mut current_result = result;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;

            // Flip for the opposite mover's perspective
            current_result = 1.0 - current_result;
            node.win_score += current_result;

            current_id = node.parent;
        }
    }

    /// Get the most visited move at the root.
    ///
    /// Ties go to the first maximal child in expansion order.
    /// Returns (move, visit_count) or None if the root has no children.
    pub fn best_action(&self) -> Option<(G::Move, u32)> {
        let root = self.get(self.root);
        let mut best: Option<(G::Move, u32)> = None;
        for &(action, child_id) in &root.children {
            let visits = self.get(child_id).visit_count;
            if best.map_or(true, |(_, best_visits)| visits > best_visits) {
                best = Some((action, visits));
            }
        }
        best
    }

    /// Visit counts of the root's children, in expansion order.
    pub fn root_visits(&self) -> Vec<(G::Move, u32)> {
        self.get(self.root)
            .children
            .iter()
            .map(|&(action, id)| (action, self.get(id).visit_count))
            .collect()
    }

    /// Get visit count distribution over root children.
    /// Returns a vector of (move, visit_fraction) pairs.
    pub fn visit_distribution(&self) -> Vec<(G::Move, f64)> {
        let visits = self.root_visits();
        let total: u32 = visits.iter().map(|(_, v)| v).sum();

        if total == 0 {
            return Vec::new();
        }

        visits
            .into_iter()
            .map(|(action, v)| (action, v as f64 / total as f64))
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}
