//! Containers holding the nodes that wait to be expanded.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::node::{NodeId, SearchNode};

/// Ordering key of the priority fringe: estimated cost, then depth, then
/// insertion order, all ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey {
    estimated_cost: usize,
    depth: u32,
    sequence: u64,
}

/// The discovered-but-unexpanded nodes of a search, ordered by strategy.
#[derive(Debug)]
pub enum Fringe {
    /// First in, first out (breadth-first).
    Queue(VecDeque<NodeId>),
    /// Last in, first out (depth-first and depth-limited).
    Stack(Vec<NodeId>),
    /// Lowest `depth + distance` first (A*).
    Priority {
        heap: BinaryHeap<Reverse<(PriorityKey, NodeId)>>,
        next_sequence: u64,
    },
}

impl Fringe {
    pub fn queue() -> Self {
        Fringe::Queue(VecDeque::new())
    }

    pub fn stack() -> Self {
        Fringe::Stack(Vec::new())
    }

    pub fn priority() -> Self {
        Fringe::Priority {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Inserts the node `id`; `node` supplies the priority key.
    pub fn push(&mut self, id: NodeId, node: &SearchNode) {
        match self {
            Fringe::Queue(queue) => queue.push_back(id),
            Fringe::Stack(stack) => stack.push(id),
            Fringe::Priority {
                heap,
                next_sequence,
            } => {
                let key = PriorityKey {
                    estimated_cost: node.estimated_cost(),
                    depth: node.depth(),
                    sequence: *next_sequence,
                };
                *next_sequence += 1;
                heap.push(Reverse((key, id)));
            }
        }
    }

    /// Removes the next node to expand.
    pub fn pop(&mut self) -> Option<NodeId> {
        match self {
            Fringe::Queue(queue) => queue.pop_front(),
            Fringe::Stack(stack) => stack.pop(),
            Fringe::Priority { heap, .. } => heap.pop().map(|Reverse((_, id))| id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Fringe::Queue(queue) => queue.len(),
            Fringe::Stack(stack) => stack.len(),
            Fringe::Priority { heap, .. } => heap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the fringe, keeping its kind.
    pub fn clear(&mut self) {
        match self {
            Fringe::Queue(queue) => queue.clear(),
            Fringe::Stack(stack) => stack.clear(),
            Fringe::Priority {
                heap,
                next_sequence,
            } => {
                heap.clear();
                *next_sequence = 0;
            }
        }
    }
}
