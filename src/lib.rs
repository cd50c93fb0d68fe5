//! # Blockworld Solver Library
//!
//! This library models the blockworld sliding-tile puzzle and solves it with
//! four interchangeable tree-search strategies: breadth-first, depth-first,
//! iterative deepening and A* with a Manhattan-distance heuristic.
//!
//! It is used by three binaries:
//! - `blockworld`: Solves one configuration and prints the solution and the
//!   search analysis, or averages several runs.
//! - `strategy_evaluator`: Runs every strategy on the same configuration and
//!   compares their average node counts.
//! - `manual_player`: Lets a person move the agent from the command line.
//!
//! ## Modules
//! - `puzzle`: Grid cells, moves and the `PuzzleState` value type.
//! - `heuristics`: Manhattan-distance helpers behind the A* ordering.
//! - `node`: Search-tree nodes stored in an arena with a free list.
//! - `fringe`: FIFO, LIFO and priority containers for unexpanded nodes.
//! - `search`: The `SearchEngine` and its strategies and counters.
//! - `report`: Text rendering of solutions and statistics.
//! - `solver`: Configuration and the entry points used by the binaries.
//! - `utils`: Parsers for grid layouts and coordinate lists.
//! - `error`: The crate-wide error type.

pub mod error;
pub mod fringe;
pub mod heuristics;
pub mod node;
pub mod puzzle;
pub mod report;
pub mod search;
pub mod solver;
pub mod utils;

pub use error::{BlockworldError, Result};
