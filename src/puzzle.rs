//! Puzzle model for the blockworld sliding-tile puzzle.
//!
//! This module defines the value types the search engine works on:
//! - `Cell`: the content of one grid cell (empty, a labeled tile, or the agent).
//! - `Direction`: the four moves the agent can make.
//! - `PuzzleState`: one grid configuration together with its cached Manhattan
//!   distance to the goal and the move that produced it.
//!
//! A `d x d` grid holds `d - 1` tiles labeled `A, B, ...` and a single agent.
//! The agent moves by swapping places with the neighbouring cell. The puzzle
//! is solved when column 1 holds `A, B, ...` from row 1 downwards.

use std::fmt;

use crate::error::{BlockworldError, Result};
use crate::heuristics::{tile_distance, TARGET_COLUMN};

/// Smallest supported grid side length.
pub const MIN_DIMENSION: usize = 2;
/// Largest supported grid side length; tiles are labeled `A` to `Z`.
pub const MAX_DIMENSION: usize = 27;
/// Character used to draw the agent.
pub const AGENT_SYMBOL: char = '\u{263B}';

/// Content of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Nothing in this cell.
    Empty,
    /// A labeled tile; `Tile(0)` is `A`, `Tile(1)` is `B`, and so on.
    Tile(u8),
    /// The agent.
    Agent,
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockworld_solver::puzzle::{Cell, AGENT_SYMBOL};
    /// assert_eq!(Cell::Tile(1).to_char(), 'B');
    /// assert_eq!(Cell::Empty.to_char(), '.');
    /// assert_eq!(Cell::Agent.to_char(), AGENT_SYMBOL);
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Tile(index) => tile_label(*index),
            Cell::Agent => AGENT_SYMBOL,
        }
    }
}

/// Label of tile `index`.
pub fn tile_label(index: u8) -> char {
    char::from(b'A' + index)
}

/// A move of the agent by one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Canonical expansion order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    /// Row and column offset of the move.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
        }
    }

    /// The move that undoes this one.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
        }
    }

    /// One-letter form used in move lists.
    pub fn to_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Left => 'L',
            Direction::Down => 'D',
            Direction::Right => 'R',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Left => "Left",
            Direction::Down => "Down",
            Direction::Right => "Right",
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = BlockworldError;

    /// Parses `U`, `L`, `D` or `R` (either case).
    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'U' => Ok(Direction::Up),
            'L' => Ok(Direction::Left),
            'D' => Ok(Direction::Down),
            'R' => Ok(Direction::Right),
            _ => Err(BlockworldError::InvalidDirection(c)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One configuration of the grid.
///
/// Cloning produces a deep copy; the search engine clones a parent state
/// and applies exactly one move to obtain each child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    dimension: usize,
    cells: Vec<Cell>,
    agent_row: usize,
    agent_col: usize,
    distance_to_solution: usize,
    last_move: Option<Direction>,
}

impl PuzzleState {
    /// Creates the default start state for a `dimension x dimension` grid.
    ///
    /// Tiles `A..` fill the last row from column 0 and the agent sits in the
    /// bottom-right corner.
    ///
    /// # Examples
    /// ```
    /// use blockworld_solver::puzzle::{Cell, PuzzleState};
    /// let state = PuzzleState::new(3).unwrap();
    /// assert_eq!(state.cell(2, 0), Cell::Tile(0));
    /// assert_eq!(state.cell(2, 1), Cell::Tile(1));
    /// assert_eq!(state.agent_position(), (2, 2));
    /// assert!(PuzzleState::new(1).is_err());
    /// ```
    pub fn new(dimension: usize) -> Result<Self> {
        validate_dimension(dimension)?;
        let last = dimension - 1;
        let mut cells = vec![Cell::Empty; dimension * dimension];
        let mut distance_to_solution = 0;
        // Tiles fill the bottom row from the left; the agent takes the corner.
        for index in 0..last {
            let tile = index as u8;
            cells[last * dimension + index] = Cell::Tile(tile);
            distance_to_solution += tile_distance(tile, last, index);
        }
        cells[last * dimension + last] = Cell::Agent;

        Ok(PuzzleState {
            dimension,
            cells,
            agent_row: last,
            agent_col: last,
            distance_to_solution,
            last_move: None,
        })
    }

    /// Creates a start state from an agent position and one `(row, col)`
    /// pair per tile, in label order.
    ///
    /// # Arguments
    /// * `dimension` - Side length of the grid.
    /// * `agent_row`, `agent_col` - Zero-based agent position.
    /// * `tile_positions` - Flat coordinate list `[rA, cA, rB, cB, ...]`.
    ///
    /// # Returns
    /// The state with its Manhattan distance summed over every tile.
    ///
    /// # Errors
    /// Fails when the number of coordinates is not `2 * (dimension - 1)`,
    /// when the agent or a tile lies outside the grid, or when a tile
    /// overlaps the agent or another tile.
    ///
    /// # Examples
    /// ```
    /// use blockworld_solver::puzzle::{Cell, PuzzleState};
    /// let state = PuzzleState::with_positions(3, 0, 0, &[1, 1, 2, 2]).unwrap();
    /// assert_eq!(state.cell(1, 1), Cell::Tile(0));
    /// assert_eq!(state.cell(2, 2), Cell::Tile(1));
    /// assert!(PuzzleState::with_positions(3, 0, 0, &[1, 1]).is_err());
    /// ```
    pub fn with_positions(
        dimension: usize,
        agent_row: usize,
        agent_col: usize,
        tile_positions: &[usize],
    ) -> Result<Self> {
        validate_dimension(dimension)?;
        let expected = (dimension - 1) * 2;
        if tile_positions.len() != expected {
            return Err(BlockworldError::WrongCoordinateCount {
                expected,
                found: tile_positions.len(),
            });
        }
        if agent_row >= dimension || agent_col >= dimension {
            return Err(BlockworldError::AgentOutOfBounds {
                row: agent_row,
                col: agent_col,
            });
        }

        let mut cells = vec![Cell::Empty; dimension * dimension];
        cells[agent_row * dimension + agent_col] = Cell::Agent;
        let mut distance_to_solution = 0;

        for (index, pair) in tile_positions.chunks_exact(2).enumerate() {
            let tile = index as u8;
            let label = tile_label(tile);
            let (row, col) = (pair[0], pair[1]);
            if row >= dimension || col >= dimension {
                return Err(BlockworldError::TileOutOfBounds { label, row, col });
            }
            match cells[row * dimension + col] {
                Cell::Agent => {
                    return Err(BlockworldError::TileOverlapsAgent { label, row, col });
                }
                Cell::Tile(other) => {
                    return Err(BlockworldError::TileOverlap {
                        label,
                        other: tile_label(other),
                        row,
                        col,
                    });
                }
                Cell::Empty => {}
            }
            cells[row * dimension + col] = Cell::Tile(tile);
            distance_to_solution += tile_distance(tile, row, col);
        }

        Ok(PuzzleState {
            dimension,
            cells,
            agent_row,
            agent_col,
            distance_to_solution,
            last_move: None,
        })
    }

    /// Creates a state from a full row-major grid, checking that it holds
    /// exactly one agent and each of the `dimension - 1` tiles exactly once.
    pub fn from_cells(dimension: usize, cells: Vec<Cell>) -> Result<Self> {
        validate_dimension(dimension)?;
        if cells.len() != dimension * dimension {
            return Err(BlockworldError::InvalidLayout(format!(
                "Expected {} cells, found {}",
                dimension * dimension,
                cells.len()
            )));
        }

        let mut agent = None;
        let mut seen = vec![false; dimension - 1];
        let mut distance_to_solution = 0;
        for (i, cell) in cells.iter().enumerate() {
            let (row, col) = (i / dimension, i % dimension);
            match *cell {
                Cell::Empty => {}
                Cell::Agent => {
                    if agent.replace((row, col)).is_some() {
                        return Err(BlockworldError::InvalidLayout(
                            "More than one agent on the grid".to_string(),
                        ));
                    }
                }
                Cell::Tile(index) => {
                    match seen.get_mut(index as usize) {
                        None => {
                            return Err(BlockworldError::InvalidLayout(format!(
                                "Tile #{index} does not exist on a {dimension}x{dimension} grid"
                            )));
                        }
                        Some(true) => {
                            return Err(BlockworldError::InvalidLayout(format!(
                                "Tile {} appears more than once",
                                tile_label(index)
                            )));
                        }
                        Some(flag) => *flag = true,
                    }
                    distance_to_solution += tile_distance(index, row, col);
                }
            }
        }

        let Some((agent_row, agent_col)) = agent else {
            return Err(BlockworldError::InvalidLayout(
                "No agent on the grid".to_string(),
            ));
        };
        if let Some(missing) = seen.iter().position(|present| !present) {
            return Err(BlockworldError::InvalidLayout(format!(
                "Tile {} is missing",
                tile_label(missing as u8)
            )));
        }

        Ok(PuzzleState {
            dimension,
            cells,
            agent_row,
            agent_col,
            distance_to_solution,
            last_move: None,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the content of cell `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below the grid dimension.
    pub fn cell(&self, r: usize, c: usize) -> Cell {
        assert!(r < self.dimension && c < self.dimension, "cell ({r}, {c}) out of bounds");
        self.cells[r * self.dimension + c]
    }

    /// `(row, col)` of the agent.
    pub fn agent_position(&self) -> (usize, usize) {
        (self.agent_row, self.agent_col)
    }

    /// Summed Manhattan distance of every tile to its target cell.
    pub fn distance_to_solution(&self) -> usize {
        self.distance_to_solution
    }

    /// The move that produced this state, `None` for a start state.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    fn neighbour(&self, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.delta();
        let row = self.agent_row.checked_add_signed(dr)?;
        let col = self.agent_col.checked_add_signed(dc)?;
        (row < self.dimension && col < self.dimension).then_some((row, col))
    }

    /// Whether the agent can move one cell in `direction` without leaving the grid.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.neighbour(direction).is_some()
    }

    /// Swaps the agent with the neighbouring cell in `direction`.
    ///
    /// The distance to the solution is adjusted by the change contributed
    /// by the displaced tile, if any, and `direction` becomes the state's
    /// last move.
    ///
    /// # Errors
    /// Returns [`BlockworldError::IllegalMove`] and leaves the state untouched
    /// if the agent would leave the grid.
    pub fn apply_move(&mut self, direction: Direction) -> Result<()> {
        let Some((row, col)) = self.neighbour(direction) else {
            return Err(BlockworldError::IllegalMove {
                direction: direction.name(),
                row: self.agent_row,
                col: self.agent_col,
            });
        };

        // Swap the agent with whatever sits on the target cell.
        let target = row * self.dimension + col;
        let origin = self.agent_row * self.dimension + self.agent_col;
        let displaced = self.cells[target];
        self.cells[target] = Cell::Agent;
        self.cells[origin] = displaced;

        // Only the displaced tile changes its distance to the goal.
        if let Cell::Tile(index) = displaced {
            let before = tile_distance(index, row, col);
            let after = tile_distance(index, self.agent_row, self.agent_col);
            self.distance_to_solution = self.distance_to_solution - before + after;
        }

        self.agent_row = row;
        self.agent_col = col;
        self.last_move = Some(direction);
        Ok(())
    }

    /// Returns a copy of this state with `direction` applied.
    pub fn moved(&self, direction: Direction) -> Result<Self> {
        let mut child = self.clone();
        child.apply_move(direction)?;
        Ok(child)
    }

    /// Goal test: every row `i >= 1` holds tile `i - 1` in column 1.
    pub fn is_solved(&self) -> bool {
        (1..self.dimension)
            .all(|i| self.cell(i, TARGET_COLUMN) == Cell::Tile((i - 1) as u8))
    }
}

fn validate_dimension(dimension: usize) -> Result<()> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(BlockworldError::InvalidDimension {
            min: MIN_DIMENSION,
            max: MAX_DIMENSION,
            found: dimension,
        })
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.dimension {
            write!(f, "|  ")?;
            for c in 0..self.dimension {
                write!(f, "{}  ", self.cell(r, c).to_char())?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::total_distance;

    /// Places the agent at `(row, col)` and the tiles on the first free cells in row-major order.
    fn state_with_agent_at(dimension: usize, row: usize, col: usize) -> PuzzleState {
        let positions: Vec<usize> = (0..dimension * dimension)
            .map(|i| (i / dimension, i % dimension))
            .filter(|&cell| cell != (row, col))
            .take(dimension - 1)
            .flat_map(|(r, c)| [r, c])
            .collect();
        PuzzleState::with_positions(dimension, row, col, &positions).unwrap()
    }

    #[test]
    fn test_default_state_layout() {
        for d in 2..=8 {
            let state = PuzzleState::new(d).unwrap();
            let agents = state.cells.iter().filter(|&&c| c == Cell::Agent).count();
            assert_eq!(agents, 1);
            assert_eq!(state.agent_position(), (d - 1, d - 1));
            assert_eq!(state.cell(d - 1, d - 1), Cell::Agent);
            for c in 0..d - 1 {
                assert_eq!(state.cell(d - 1, c), Cell::Tile(c as u8));
            }
            for r in 0..d - 1 {
                for c in 0..d {
                    assert_eq!(state.cell(r, c), Cell::Empty);
                }
            }
            assert_eq!(state.last_move(), None);
            assert_eq!(state.distance_to_solution(), total_distance(&state));
        }
    }

    #[test]
    fn test_dimension_bounds() {
        assert!(matches!(
            PuzzleState::new(1),
            Err(BlockworldError::InvalidDimension { found: 1, .. })
        ));
        assert!(PuzzleState::new(MAX_DIMENSION).is_ok());
        assert!(PuzzleState::new(MAX_DIMENSION + 1).is_err());
    }

    #[test]
    fn test_can_move_matches_bounds_everywhere() {
        let d = 4;
        for r in 0..d {
            for c in 0..d {
                let state = state_with_agent_at(d, r, c);
                assert_eq!(state.can_move(Direction::Up), r > 0, "Up at ({r},{c})");
                assert_eq!(state.can_move(Direction::Down), r < d - 1, "Down at ({r},{c})");
                assert_eq!(state.can_move(Direction::Left), c > 0, "Left at ({r},{c})");
                assert_eq!(state.can_move(Direction::Right), c < d - 1, "Right at ({r},{c})");
            }
        }
    }

    #[test]
    fn test_move_then_opposite_restores_state() {
        let d = 4;
        for r in 0..d {
            for c in 0..d {
                let state = state_with_agent_at(d, r, c);
                for direction in Direction::ALL {
                    if !state.can_move(direction) {
                        continue;
                    }
                    let mut moved = state.moved(direction).unwrap();
                    assert_eq!(moved.distance_to_solution(), total_distance(&moved));
                    moved.apply_move(direction.opposite()).unwrap();
                    assert_eq!(moved.cells, state.cells);
                    assert_eq!(moved.agent_position(), state.agent_position());
                    assert_eq!(moved.distance_to_solution(), state.distance_to_solution());
                    assert_eq!(moved.last_move(), Some(direction.opposite()));
                }
            }
        }
    }

    #[test]
    fn test_move_swaps_agent_and_tile() {
        // d = 2: A at (1,0), agent at (1,1). Moving left pushes A onto its target.
        let mut state = PuzzleState::new(2).unwrap();
        assert_eq!(state.distance_to_solution(), 1);
        state.apply_move(Direction::Left).unwrap();
        assert_eq!(state.agent_position(), (1, 0));
        assert_eq!(state.cell(1, 0), Cell::Agent);
        assert_eq!(state.cell(1, 1), Cell::Tile(0));
        assert_eq!(state.distance_to_solution(), 0);
        assert_eq!(state.last_move(), Some(Direction::Left));
        assert!(state.is_solved());
    }

    #[test]
    fn test_illegal_move_is_rejected_without_side_effects() {
        let mut state = PuzzleState::new(3).unwrap();
        let before = state.clone();
        let err = state.apply_move(Direction::Down).unwrap_err();
        assert_eq!(
            err,
            BlockworldError::IllegalMove {
                direction: "Down",
                row: 2,
                col: 2
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let parent = PuzzleState::new(3).unwrap();
        let child = parent.moved(Direction::Up).unwrap();
        assert_eq!(parent.agent_position(), (2, 2));
        assert_eq!(child.agent_position(), (1, 2));
        assert_eq!(parent.cell(2, 2), Cell::Agent);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::try_from('U').unwrap(), Direction::Up);
        assert_eq!(Direction::try_from('l').unwrap(), Direction::Left);
        assert_eq!(Direction::try_from('D').unwrap(), Direction::Down);
        assert_eq!(Direction::try_from('r').unwrap(), Direction::Right);
        assert_eq!(
            Direction::try_from('X').unwrap_err(),
            BlockworldError::InvalidDirection('X')
        );
        for direction in Direction::ALL {
            assert_eq!(Direction::try_from(direction.to_char()).unwrap(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_is_solved() {
        for d in 2..=6 {
            assert!(!PuzzleState::new(d).unwrap().is_solved());
        }
        // Column 1 holds A, B, C from row 1 down; agent and row 0 are irrelevant.
        let solved = PuzzleState::with_positions(4, 0, 3, &[1, 1, 2, 1, 3, 1]).unwrap();
        assert!(solved.is_solved());
        assert_eq!(solved.distance_to_solution(), 0);

        let swapped = PuzzleState::with_positions(4, 0, 3, &[2, 1, 1, 1, 3, 1]).unwrap();
        assert!(!swapped.is_solved());

        let shifted = PuzzleState::with_positions(4, 0, 1, &[1, 2, 2, 2, 3, 2]).unwrap();
        assert!(!shifted.is_solved());
    }

    #[test]
    fn test_custom_state_wrong_coordinate_count() {
        let err = PuzzleState::with_positions(4, 0, 0, &[1, 1, 2, 1]).unwrap_err();
        assert_eq!(
            err,
            BlockworldError::WrongCoordinateCount {
                expected: 6,
                found: 4
            }
        );
        assert!(PuzzleState::with_positions(4, 0, 0, &[1, 1, 2, 1, 3]).is_err());
    }

    #[test]
    fn test_custom_state_rejects_bad_positions() {
        assert_eq!(
            PuzzleState::with_positions(3, 3, 0, &[1, 1, 2, 1]).unwrap_err(),
            BlockworldError::AgentOutOfBounds { row: 3, col: 0 }
        );
        assert_eq!(
            PuzzleState::with_positions(3, 0, 0, &[1, 1, 2, 3]).unwrap_err(),
            BlockworldError::TileOutOfBounds {
                label: 'B',
                row: 2,
                col: 3
            }
        );
        assert_eq!(
            PuzzleState::with_positions(3, 1, 1, &[1, 1, 2, 1]).unwrap_err(),
            BlockworldError::TileOverlapsAgent {
                label: 'A',
                row: 1,
                col: 1
            }
        );
        assert_eq!(
            PuzzleState::with_positions(3, 0, 0, &[1, 1, 1, 1]).unwrap_err(),
            BlockworldError::TileOverlap {
                label: 'B',
                other: 'A',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn test_custom_state_heuristic_sums_every_tile() {
        // A at (0,0): |0-1| + |0-1| = 2, B at (0,2): |0-2| + |2-1| = 3.
        // Only keeping the last tile's contribution would give 3.
        let state = PuzzleState::with_positions(3, 2, 2, &[0, 0, 0, 2]).unwrap();
        assert_eq!(state.distance_to_solution(), 5);
        assert_eq!(state.distance_to_solution(), total_distance(&state));
    }

    #[test]
    fn test_from_cells_validation() {
        use Cell::{Agent, Empty, Tile};
        let state = PuzzleState::from_cells(2, vec![Empty, Empty, Tile(0), Agent]).unwrap();
        assert_eq!(state, PuzzleState::new(2).unwrap());

        assert!(PuzzleState::from_cells(2, vec![Empty, Agent, Tile(0), Agent]).is_err());
        assert!(PuzzleState::from_cells(2, vec![Empty, Empty, Tile(0), Tile(0)]).is_err());
        assert!(PuzzleState::from_cells(2, vec![Empty, Empty, Empty, Agent]).is_err());
        assert!(PuzzleState::from_cells(2, vec![Tile(1), Empty, Tile(0), Agent]).is_err());
        assert!(PuzzleState::from_cells(2, vec![Empty, Tile(0), Agent]).is_err());
    }

    #[test]
    fn test_display_format() {
        let state = PuzzleState::new(3).unwrap();
        let expected = format!(
            "|  .  .  .  |\n|  .  .  .  |\n|  A  B  {}  |\n",
            AGENT_SYMBOL
        );
        assert_eq!(state.to_string(), expected);
    }
}
