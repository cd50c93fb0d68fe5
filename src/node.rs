//! Search-tree nodes and the arena that owns them.
//!
//! Siblings share their parent, so nodes refer to each other through
//! [`NodeId`] handles into a [`NodeArena`] instead of owning pointers. Each
//! node counts the children that still depend on it; the engine uses that
//! count to release chains of nodes that no longer lead anywhere. Released
//! slots are recycled by later insertions.

use std::ops::{Index, IndexMut};

use crate::error::{BlockworldError, Result};
use crate::puzzle::PuzzleState;

/// Handle to a node stored in a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A puzzle state placed in the search tree.
#[derive(Clone, Debug)]
pub struct SearchNode {
    state: PuzzleState,
    parent: Option<NodeId>,
    depth: u32,
    live_children: u32,
}

impl SearchNode {
    /// Creates the root node at depth 0.
    pub fn root(state: PuzzleState) -> Self {
        SearchNode {
            state,
            parent: None,
            depth: 0,
            live_children: 0,
        }
    }

    /// Creates a child of `parent`, one level below `parent_depth`.
    pub fn child(state: PuzzleState, parent: NodeId, parent_depth: u32) -> Self {
        SearchNode {
            state,
            parent: Some(parent),
            depth: parent_depth + 1,
            live_children: 0,
        }
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of retained children that still need this node to reach the root.
    pub fn live_children(&self) -> u32 {
        self.live_children
    }

    /// A* ordering key: depth plus the Manhattan distance of the state.
    pub fn estimated_cost(&self) -> usize {
        self.depth as usize + self.state.distance_to_solution()
    }
}

/// Slot storage for the nodes of one search tree.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<SearchNode>>,
    free: Vec<NodeId>,
    len: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `node` and returns its handle, reusing a released slot when one is available.
    ///
    /// # Errors
    /// Returns [`BlockworldError::MemoryExhausted`] if the slot vector cannot grow.
    pub fn insert(&mut self, node: SearchNode) -> Result<NodeId> {
        if let Some(id) = self.free.pop() {
            self.slots[id.0] = Some(node);
            self.len += 1;
            return Ok(id);
        }
        if self.slots.len() == self.slots.capacity() {
            // Grow geometrically but fallibly so allocator failure becomes an error.
            let additional = self.slots.len().max(16);
            self.slots
                .try_reserve(additional)
                .map_err(|_| BlockworldError::MemoryExhausted {
                    live_nodes: self.len,
                })?;
        }
        self.slots.push(Some(node));
        self.len += 1;
        Ok(NodeId(self.slots.len() - 1))
    }

    /// Releases the node behind `id`, returning it if it was still stored.
    pub fn remove(&mut self, id: NodeId) -> Option<SearchNode> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        self.len -= 1;
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.slots.get(id.0)?.as_ref()
    }

    /// Adds one dependent child to `id`.
    pub fn retain_child(&mut self, id: NodeId) {
        self[id].live_children += 1;
    }

    /// Removes one dependent child from `id`, returning the remaining count.
    pub fn release_child(&mut self, id: NodeId) -> u32 {
        let node = &mut self[id];
        node.live_children = node.live_children.saturating_sub(1);
        node.live_children
    }

    /// Drops every node except `keep`, whose child count is reset to zero.
    pub fn retain_only(&mut self, keep: NodeId) {
        let kept = self.slots.get_mut(keep.0).and_then(Option::take);
        self.clear();
        if let Some(mut node) = kept {
            node.live_children = 0;
            // The kept node stays behind its handle; every slot below it is free.
            self.slots.resize_with(keep.0 + 1, || None);
            self.free = (0..keep.0).rev().map(NodeId).collect();
            self.slots[keep.0] = Some(node);
            self.len = 1;
        }
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// States from the root down to `id`, inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<&PuzzleState> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.get(id)) {
            path.push(node.state());
            current = node.parent();
        }
        path.reverse();
        path
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    /// # Panics
    /// Panics if the node behind `id` has been released.
    fn index(&self, id: NodeId) -> &SearchNode {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {id:?} has been released"),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut SearchNode {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("node {id:?} has been released"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Direction;

    fn build_chain(arena: &mut NodeArena, length: usize) -> Vec<NodeId> {
        let mut state = PuzzleState::new(3).unwrap();
        let root = arena.insert(SearchNode::root(state.clone())).unwrap();
        let mut ids = vec![root];
        for i in 0..length {
            let direction = if i % 2 == 0 { Direction::Up } else { Direction::Down };
            state.apply_move(direction).unwrap();
            let parent = *ids.last().unwrap();
            let depth = arena[parent].depth();
            let id = arena.insert(SearchNode::child(state.clone(), parent, depth)).unwrap();
            arena.retain_child(parent);
            ids.push(id);
        }
        ids
    }

    #[test]
    fn test_child_depth_and_parent() {
        let mut arena = NodeArena::new();
        let ids = build_chain(&mut arena, 3);
        assert_eq!(arena.len(), 4);
        for (depth, id) in ids.iter().enumerate() {
            assert_eq!(arena[*id].depth(), depth as u32);
        }
        assert_eq!(arena[ids[0]].parent(), None);
        assert_eq!(arena[ids[2]].parent(), Some(ids[1]));
        assert_eq!(arena[ids[1]].live_children(), 1);
        assert_eq!(arena[ids[3]].live_children(), 0);
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut arena = NodeArena::new();
        let ids = build_chain(&mut arena, 2);
        let removed = arena.remove(ids[2]).unwrap();
        assert_eq!(removed.depth(), 2);
        assert_eq!(arena.len(), 2);
        assert!(arena.get(ids[2]).is_none());
        assert!(arena.remove(ids[2]).is_none());

        let state = PuzzleState::new(3).unwrap();
        let reused = arena.insert(SearchNode::child(state, ids[1], 1)).unwrap();
        assert_eq!(reused, ids[2]);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_release_child_counts_down() {
        let mut arena = NodeArena::new();
        let ids = build_chain(&mut arena, 1);
        arena.retain_child(ids[0]);
        assert_eq!(arena[ids[0]].live_children(), 2);
        assert_eq!(arena.release_child(ids[0]), 1);
        assert_eq!(arena.release_child(ids[0]), 0);
        assert_eq!(arena.release_child(ids[0]), 0);
    }

    #[test]
    fn test_retain_only_keeps_root() {
        let mut arena = NodeArena::new();
        let ids = build_chain(&mut arena, 4);
        arena.retain_only(ids[0]);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena[ids[0]].depth(), 0);
        assert_eq!(arena[ids[0]].live_children(), 0);
        assert!(arena.get(ids[1]).is_none());
    }

    #[test]
    fn test_path_to_walks_from_root() {
        let mut arena = NodeArena::new();
        let ids = build_chain(&mut arena, 3);
        let path = arena.path_to(ids[3]);
        assert_eq!(path.len(), 4);
        assert_eq!(path[0].last_move(), None);
        assert_eq!(path[1].last_move(), Some(Direction::Up));
        assert_eq!(path[2].last_move(), Some(Direction::Down));
        assert_eq!(path[3].last_move(), Some(Direction::Up));
    }

    #[test]
    fn test_estimated_cost() {
        let state = PuzzleState::new(3).unwrap();
        let h = state.distance_to_solution();
        let node = SearchNode::child(state, NodeId(0), 4);
        assert_eq!(node.estimated_cost(), 5 + h);
    }
}
