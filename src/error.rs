//! Error type shared by the puzzle model, the search engine and the parsers.

/// Everything that can go wrong while building a puzzle or running a search.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockworldError {
    /// The grid side length is outside the supported range.
    #[error("Grid dimension must be between {min} and {max}, got {found}")]
    InvalidDimension { min: usize, max: usize, found: usize },

    /// A strategy tag that does not name one of the four search strategies.
    #[error("This strategy is not recognized: {0}")]
    InvalidStrategy(String),

    /// A direction character other than U, L, D or R.
    #[error("Unrecognized direction: {0}")]
    InvalidDirection(char),

    /// The agent would leave the grid.
    #[error("Cannot move {direction} from ({row}, {col})")]
    IllegalMove {
        direction: &'static str,
        row: usize,
        col: usize,
    },

    /// Custom layouts need one (row, col) pair per tile.
    #[error("Each tile needs 2 coordinates, making a total of {expected} numbers, found {found}")]
    WrongCoordinateCount { expected: usize, found: usize },

    #[error("Agent position ({row}, {col}) is out of the grid's bounds")]
    AgentOutOfBounds { row: usize, col: usize },

    #[error("Tile {label} position ({row}, {col}) is out of the grid's bounds")]
    TileOutOfBounds { label: char, row: usize, col: usize },

    #[error("Tile {label} at ({row}, {col}) overlaps the agent")]
    TileOverlapsAgent { label: char, row: usize, col: usize },

    #[error("Tile {label} at ({row}, {col}) overlaps tile {other}")]
    TileOverlap {
        label: char,
        other: char,
        row: usize,
        col: usize,
    },

    /// A textual grid layout or coordinate list that could not be parsed.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// The averaging mode needs at least one run.
    #[error("Number of runs must be at least 1")]
    InvalidRunCount,

    /// The live node count hit the configured budget or the allocator refused to grow the tree.
    #[error("Ran out of memory with {live_nodes} nodes alive")]
    MemoryExhausted { live_nodes: usize },

    /// Depth-limited attempts need the LIFO fringe of depth-first strategies.
    #[error("{strategy} cannot run a depth-limited search")]
    DepthLimitUnsupported { strategy: &'static str },

    /// The fringe emptied in a search that is not depth-bounded.
    #[error("The fringe was exhausted without reaching a solution")]
    FringeExhausted,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlockworldError>;
