use crate::error::{BlockworldError, Result};
use crate::puzzle::{Cell, PuzzleState, AGENT_SYMBOL};

/// Parses a grid layout into a `PuzzleState`.
///
/// Each string slice is one row, starting from row 0; the number of rows is
/// the grid dimension. Whitespace and `|` are ignored, so the output of the
/// state's `Display` implementation parses back.
///
/// Valid characters for cells are:
/// - '.': an empty cell
/// - 'A'..='Z': a tile
/// - '*', '@' or '☻': the agent
///
/// # Returns
/// * `Ok(PuzzleState)` if the layout is a square grid with exactly one agent
///   and every tile of the grid exactly once.
/// * `Err(BlockworldError)` otherwise.
///
/// # Examples
/// ```
/// use blockworld_solver::utils::state_from_str_array;
/// use blockworld_solver::puzzle::{Cell, PuzzleState};
///
/// let state = state_from_str_array(&["...", "...", "AB*"]).unwrap();
/// assert_eq!(state, PuzzleState::new(3).unwrap());
///
/// let printed = state.to_string();
/// let rows: Vec<&str> = printed.lines().collect();
/// assert_eq!(state_from_str_array(&rows).unwrap(), state);
///
/// assert!(state_from_str_array(&["..", "AX"]).is_err());
/// ```
pub fn state_from_str_array(rows: &[&str]) -> Result<PuzzleState> {
    let dimension = rows.len();
    let mut cells = Vec::with_capacity(dimension * dimension);

    for (r, row_str) in rows.iter().enumerate() {
        let row: Vec<char> = row_str
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if row.len() != dimension {
            return Err(BlockworldError::InvalidLayout(format!(
                "Row {r} has {} cells, expected {dimension}",
                row.len()
            )));
        }

        for (c, ch) in row.into_iter().enumerate() {
            let cell = match ch {
                '.' => Cell::Empty,
                '*' | '@' | AGENT_SYMBOL => Cell::Agent,
                'A'..='Z' => Cell::Tile(ch as u8 - b'A'),
                _ => {
                    return Err(BlockworldError::InvalidLayout(format!(
                        "Unrecognized character '{ch}' in row {r} col {c}"
                    )))
                }
            };
            cells.push(cell);
        }
    }

    PuzzleState::from_cells(dimension, cells)
}

/// Parses a list of non-negative integers separated by commas and/or whitespace.
///
/// # Examples
/// ```
/// use blockworld_solver::utils::parse_coordinates;
/// assert_eq!(parse_coordinates("2,0, 2 1").unwrap(), vec![2, 0, 2, 1]);
/// assert!(parse_coordinates("1,x").is_err());
/// ```
pub fn parse_coordinates(s: &str) -> Result<Vec<usize>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>().map_err(|_| {
                BlockworldError::InvalidLayout(format!("'{part}' is not a valid coordinate"))
            })
        })
        .collect()
}

/// Parses an agent position written as `ROW,COL`.
pub fn parse_position(s: &str) -> Result<(usize, usize)> {
    match parse_coordinates(s)?.as_slice() {
        &[row, col] => Ok((row, col)),
        other => Err(BlockworldError::InvalidLayout(format!(
            "A position needs exactly 2 coordinates, found {}",
            other.len()
        ))),
    }
}
