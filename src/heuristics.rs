//! Manhattan-distance helpers for the blockworld goal.
//!
//! Tile `k` (label `A + k`) belongs at row `k + 1` of column 1. The
//! distance of a state is the sum over tiles of the Manhattan distance
//! between each tile and that target. [`crate::puzzle::PuzzleState`] keeps
//! the total up to date incrementally; [`total_distance`] recomputes it from
//! scratch and is used to cross-check that bookkeeping.

use crate::puzzle::{Cell, PuzzleState};

/// The column every tile must end up in.
pub const TARGET_COLUMN: usize = 1;

/// Returns the `(row, col)` cell tile `index` must occupy in a solved grid.
///
/// # Examples
/// ```
/// use blockworld_solver::heuristics::tile_target;
/// assert_eq!(tile_target(0), (1, 1)); // A
/// assert_eq!(tile_target(2), (3, 1)); // C
/// ```
pub fn tile_target(index: u8) -> (usize, usize) {
    (index as usize + 1, TARGET_COLUMN)
}

/// Manhattan distance between tile `index` placed at `(row, col)` and its target.
pub fn tile_distance(index: u8, row: usize, col: usize) -> usize {
    let (target_row, target_col) = tile_target(index);
    row.abs_diff(target_row) + col.abs_diff(target_col)
}

/// Recomputes the summed Manhattan distance of every tile on the grid.
pub fn total_distance(state: &PuzzleState) -> usize {
    let dimension = state.dimension();
    let mut total = 0;
    for r in 0..dimension {
        for c in 0..dimension {
            if let Cell::Tile(index) = state.cell(r, c) {
                total += tile_distance(index, r, c);
            }
        }
    }
    total
}
