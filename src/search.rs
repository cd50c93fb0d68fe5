//! Tree-search engine for the blockworld puzzle.
//!
//! [`SearchEngine`] runs one of four strategies over the tree of puzzle
//! states rooted at a start state:
//! - breadth-first, with a FIFO fringe;
//! - depth-first, with a LIFO fringe;
//! - iterative deepening, repeated depth-limited searches over a LIFO fringe;
//! - A*, with a fringe ordered by depth plus Manhattan distance.
//!
//! This is a pure tree search: a configuration reached along two different
//! paths is expanded twice. Depth-limited attempts release every chain of
//! nodes that no longer supports a node in the fringe, so iterative
//! deepening only keeps the current branch and its pending siblings alive.
//!
//! The engine counts the nodes it creates (time complexity), the nodes
//! alive right now, and the peak of the latter (space complexity).

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{BlockworldError, Result};
use crate::fringe::Fringe;
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::puzzle::{Direction, PuzzleState};

/// The search strategy driving an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    IterativeDeepening,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::IterativeDeepening,
        Strategy::AStar,
    ];

    /// Human-readable name used in reports.
    pub fn full_name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "Breadth First Search",
            Strategy::DepthFirst => "Depth First Search",
            Strategy::IterativeDeepening => "Iterative Deepening Search",
            Strategy::AStar => "A* Heuristic Search",
        }
    }

    /// One-letter tag: `B`, `D`, `I` or `A`.
    pub fn tag(self) -> char {
        match self {
            Strategy::BreadthFirst => 'B',
            Strategy::DepthFirst => 'D',
            Strategy::IterativeDeepening => 'I',
            Strategy::AStar => 'A',
        }
    }

    fn new_fringe(self) -> Fringe {
        match self {
            Strategy::BreadthFirst => Fringe::queue(),
            Strategy::DepthFirst | Strategy::IterativeDeepening => Fringe::stack(),
            Strategy::AStar => Fringe::priority(),
        }
    }
}

impl TryFrom<char> for Strategy {
    type Error = BlockworldError;

    fn try_from(tag: char) -> Result<Self> {
        match tag.to_ascii_uppercase() {
            'B' => Ok(Strategy::BreadthFirst),
            'D' => Ok(Strategy::DepthFirst),
            'I' => Ok(Strategy::IterativeDeepening),
            'A' => Ok(Strategy::AStar),
            _ => Err(BlockworldError::InvalidStrategy(tag.to_string())),
        }
    }
}

impl FromStr for Strategy {
    type Err = BlockworldError;

    /// Accepts the one-letter tags and the usual short and long names.
    ///
    /// ```
    /// use blockworld_solver::search::Strategy;
    /// assert_eq!("B".parse::<Strategy>().unwrap(), Strategy::BreadthFirst);
    /// assert_eq!("ids".parse::<Strategy>().unwrap(), Strategy::IterativeDeepening);
    /// assert_eq!("a*".parse::<Strategy>().unwrap(), Strategy::AStar);
    /// assert!("greedy".parse::<Strategy>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "b" | "bfs" | "breadthfirst" | "breadthfirstsearch" => Ok(Strategy::BreadthFirst),
            "d" | "dfs" | "depthfirst" | "depthfirstsearch" => Ok(Strategy::DepthFirst),
            "i" | "ids" | "iterativedeepening" | "iterativedeepeningsearch" => {
                Ok(Strategy::IterativeDeepening)
            }
            "a" | "a*" | "astar" | "a*heuristicsearch" => Ok(Strategy::AStar),
            _ => Err(BlockworldError::InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Knobs that change how a search runs but not what it searches for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Shuffle the move order before every expansion.
    pub randomize_moves: bool,
    /// Log every visited node at `info` level.
    pub verbose_trace: bool,
    /// Abort with [`BlockworldError::MemoryExhausted`] once this many nodes are alive.
    pub max_live_nodes: Option<usize>,
    /// Seed for the move shuffling; entropy is used when absent.
    pub seed: Option<u64>,
}

/// Node counters of a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchMetrics {
    /// Nodes created since the search started.
    pub time_complexity: usize,
    /// Nodes alive right now.
    pub current_space_complexity: usize,
    /// Peak of `current_space_complexity`.
    pub space_complexity: usize,
}

impl SearchMetrics {
    fn record_created(&mut self) {
        self.time_complexity += 1;
        self.current_space_complexity += 1;
        self.space_complexity = self.space_complexity.max(self.current_space_complexity);
    }

    fn record_released(&mut self) {
        self.current_space_complexity -= 1;
    }
}

/// The result of a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub strategy: Strategy,
    /// States from the start state to the solved state, inclusive.
    pub states: Vec<PuzzleState>,
    pub solution_depth: u32,
    pub metrics: SearchMetrics,
}

impl SearchOutcome {
    /// The moves leading from the start state to the solution.
    pub fn moves(&self) -> Vec<Direction> {
        self.states
            .iter()
            .skip(1)
            .filter_map(PuzzleState::last_move)
            .collect()
    }

    pub fn final_state(&self) -> Option<&PuzzleState> {
        self.states.last()
    }
}

/// Means over several runs of the same search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AverageStats {
    pub strategy: Strategy,
    pub runs: usize,
    pub time_complexity: f64,
    pub space_complexity: f64,
    pub solution_depth: f64,
}

/// Runs tree searches with one strategy.
///
/// The engine owns its tree, fringe, counters, move order and random number
/// generator; separate engines share nothing.
///
/// # Examples
/// ```
/// use blockworld_solver::puzzle::{Direction, PuzzleState};
/// use blockworld_solver::search::{SearchEngine, SearchOptions, Strategy};
///
/// let mut engine = SearchEngine::new(Strategy::BreadthFirst, SearchOptions::default());
/// let outcome = engine.run(PuzzleState::new(2).unwrap()).unwrap();
/// assert_eq!(outcome.moves(), vec![Direction::Left]);
/// assert_eq!(outcome.metrics.time_complexity, 5);
/// ```
#[derive(Debug)]
pub struct SearchEngine {
    strategy: Strategy,
    options: SearchOptions,
    arena: NodeArena,
    root: Option<NodeId>,
    fringe: Fringe,
    metrics: SearchMetrics,
    move_order: [Direction; 4],
    rng: SmallRng,
}

impl SearchEngine {
    pub fn new(strategy: Strategy, options: SearchOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        SearchEngine {
            strategy,
            options,
            arena: NodeArena::new(),
            root: None,
            fringe: strategy.new_fringe(),
            metrics: SearchMetrics::default(),
            move_order: Direction::ALL,
            rng,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn metrics(&self) -> SearchMetrics {
        self.metrics
    }

    /// Nodes currently held by the tree.
    pub fn live_nodes(&self) -> usize {
        self.arena.len()
    }

    /// Drops the tree, empties the fringe and zeroes the counters. The
    /// strategy, fringe kind and random number generator are kept.
    pub fn reset(&mut self) {
        self.arena.clear();
        self.root = None;
        self.fringe.clear();
        self.metrics = SearchMetrics::default();
        self.move_order = Direction::ALL;
    }

    /// Resets the engine and installs `initial` as the root of a new tree.
    pub fn initialize(&mut self, initial: PuzzleState) -> Result<NodeId> {
        self.reset();
        self.add_node(initial, None)
    }

    /// Searches from `initial` until a solved state is dequeued.
    ///
    /// # Arguments
    /// * `initial` - The start state; it becomes the root of a fresh tree.
    ///
    /// # Returns
    /// The path from the start state to the solution and the counters of the
    /// search. The tree itself is released before returning, while
    /// [`SearchEngine::metrics`] keeps the final counters.
    ///
    /// # Errors
    /// Returns [`BlockworldError::MemoryExhausted`] when the live node budget
    /// is hit or the tree cannot grow. The tree is released before returning.
    pub fn run(&mut self, initial: PuzzleState) -> Result<SearchOutcome> {
        debug!("Finding a solution with {}", self.strategy);
        let result = self.search(initial);
        match result {
            Ok(solution) => {
                let outcome = self.outcome(solution);
                self.release_tree();
                debug!(
                    "{} finished: depth {}, {} nodes created, at most {} alive",
                    self.strategy,
                    outcome.solution_depth,
                    outcome.metrics.time_complexity,
                    outcome.metrics.space_complexity
                );
                Ok(outcome)
            }
            Err(err) => {
                debug!("{} aborted: {err}", self.strategy);
                self.reset();
                Err(err)
            }
        }
    }

    /// Runs the search `times` times from the same start state and averages
    /// the counters and the solution depth. The engine is reset between runs.
    pub fn run_many(&mut self, initial: &PuzzleState, times: usize) -> Result<AverageStats> {
        if times == 0 {
            return Err(BlockworldError::InvalidRunCount);
        }

        let mut total_time = 0.0;
        let mut total_space = 0.0;
        let mut total_depth = 0.0;
        for run in 1..=times {
            let outcome = self.run(initial.clone())?;
            debug!("Run {run}/{times} found a solution at depth {}", outcome.solution_depth);
            total_time += outcome.metrics.time_complexity as f64;
            total_space += outcome.metrics.space_complexity as f64;
            total_depth += f64::from(outcome.solution_depth);
        }
        self.reset();

        let runs = times as f64;
        Ok(AverageStats {
            strategy: self.strategy,
            runs: times,
            time_complexity: total_time / runs,
            space_complexity: total_space / runs,
            solution_depth: total_depth / runs,
        })
    }

    /// Drops every node and pending fringe entry but keeps the counters.
    fn release_tree(&mut self) {
        self.arena.clear();
        self.fringe.clear();
        self.root = None;
    }

    fn search(&mut self, initial: PuzzleState) -> Result<NodeId> {
        let root = self.initialize(initial)?;
        match self.strategy {
            Strategy::IterativeDeepening => self.iterative_deepening_search(),
            Strategy::BreadthFirst | Strategy::DepthFirst | Strategy::AStar => {
                self.expand_until_solved(root)
            }
        }
    }

    fn outcome(&self, solution: NodeId) -> SearchOutcome {
        SearchOutcome {
            strategy: self.strategy,
            states: self.arena.path_to(solution).into_iter().cloned().collect(),
            solution_depth: self.arena[solution].depth(),
            metrics: self.metrics,
        }
    }

    /// Registers a node. The first node of a tree becomes the root and stays
    /// out of the fringe; every other node is pushed into the fringe and
    /// counted as a live child of `parent`.
    fn add_node(&mut self, state: PuzzleState, parent: Option<NodeId>) -> Result<NodeId> {
        if let Some(limit) = self.options.max_live_nodes {
            if self.metrics.current_space_complexity >= limit {
                return Err(BlockworldError::MemoryExhausted {
                    live_nodes: self.metrics.current_space_complexity,
                });
            }
        }

        let id = match parent {
            // The root is expanded directly and never queued.
            None => {
                let id = self.arena.insert(SearchNode::root(state))?;
                self.root = Some(id);
                id
            }
            Some(parent) => {
                let depth = self.arena[parent].depth();
                let id = self.arena.insert(SearchNode::child(state, parent, depth))?;
                self.arena.retain_child(parent);
                self.fringe.push(id, &self.arena[id]);
                id
            }
        };
        self.metrics.record_created();
        Ok(id)
    }

    /// Releases `id` and then each ancestor left without live children,
    /// stopping at the root.
    fn discard_node(&mut self, mut id: NodeId) {
        while Some(id) != self.root && self.arena[id].live_children() == 0 {
            let Some(node) = self.arena.remove(id) else {
                break;
            };
            self.metrics.record_released();
            let Some(parent) = node.parent() else {
                break;
            };
            self.arena.release_child(parent);
            id = parent;
        }
    }

    /// Adds every legal child of `id` in the current move order.
    fn expand(&mut self, id: NodeId) -> Result<()> {
        if self.options.randomize_moves {
            self.move_order.shuffle(&mut self.rng);
        }
        for direction in self.move_order {
            let state = self.arena[id].state();
            if state.can_move(direction) {
                let child = state.moved(direction)?;
                self.add_node(child, Some(id))?;
            }
        }
        Ok(())
    }

    fn expand_until_solved(&mut self, root: NodeId) -> Result<NodeId> {
        let mut current = root;
        while !self.arena[current].state().is_solved() {
            self.trace(current);
            self.expand(current)?;
            current = self.fringe.pop().ok_or(BlockworldError::FringeExhausted)?;
        }
        Ok(current)
    }

    /// One depth-limited attempt from the current root: nodes shallower
    /// than `limit` are expanded, the others are discarded.
    ///
    /// Returns `Ok(None)` when the fringe runs dry without a solution (or
    /// when the engine has no root). Call [`SearchEngine::initialize`]
    /// before the first attempt.
    ///
    /// # Errors
    /// Returns [`BlockworldError::DepthLimitUnsupported`] for breadth-first
    /// and A* engines, whose fringe does not pop the deepest node first.
    pub fn depth_limited_search(&mut self, limit: u32) -> Result<Option<NodeId>> {
        if !matches!(
            self.strategy,
            Strategy::DepthFirst | Strategy::IterativeDeepening
        ) {
            return Err(BlockworldError::DepthLimitUnsupported {
                strategy: self.strategy.full_name(),
            });
        }
        let Some(mut current) = self.root else {
            return Ok(None);
        };
        if self.options.verbose_trace {
            info!("Depth limit: {limit}");
        }

        while !self.arena[current].state().is_solved() {
            self.trace(current);
            if self.arena[current].depth() < limit {
                self.expand(current)?;
            } else {
                // Leaves at the limit are dropped together with any ancestor
                // that has nothing left in the fringe.
                self.discard_node(current);
            }

            match self.fringe.pop() {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    fn iterative_deepening_search(&mut self) -> Result<NodeId> {
        let mut limit = 0;
        loop {
            if let Some(solution) = self.depth_limited_search(limit)? {
                return Ok(solution);
            }
            debug!(
                "Depth limit {limit} exhausted after {} nodes created",
                self.metrics.time_complexity
            );
            self.restart_attempt();
            limit += 1;
        }
    }

    /// Prepares the next depth-limited attempt: only the root survives.
    fn restart_attempt(&mut self) {
        self.fringe.clear();
        if let Some(root) = self.root {
            self.arena.retain_only(root);
        }
        self.metrics.current_space_complexity = self.arena.len();
    }

    fn trace(&self, id: NodeId) {
        if !self.options.verbose_trace {
            return;
        }
        let node = &self.arena[id];
        let with_distance = self.strategy == Strategy::AStar;
        match node.parent().and_then(|parent| self.arena.get(parent)) {
            Some(parent) => {
                if with_distance {
                    info!(
                        "From parent on depth {} with the Manhattan distance {}:\n{}",
                        parent.depth(),
                        parent.state().distance_to_solution(),
                        parent.state()
                    );
                } else {
                    info!("From parent on depth {}:\n{}", parent.depth(), parent.state());
                }
                let action = node.state().last_move().map_or("-", Direction::name);
                if with_distance {
                    info!(
                        "By performing action {action}, we reach a Manhattan distance of {}",
                        node.state().distance_to_solution()
                    );
                } else {
                    info!("By performing action {action}");
                }
                info!("We reached the current state:\n{}", node.state());
            }
            None => info!("The initial state is:\n{}", node.state()),
        }
        info!("Current node depth: {}", node.depth());
    }
}
