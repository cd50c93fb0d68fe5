//! Text reports for finished searches.
//!
//! Each report is a small borrowing wrapper with a [`fmt::Display`] impl, so
//! it can be printed directly or turned into a `String` with the `format_*`
//! helpers.

use std::fmt;

use crate::puzzle::Direction;
use crate::search::{AverageStats, SearchOutcome};

const SEPARATOR: &str = "=================================";

/// Joins moves as `U > L > D`.
///
/// # Examples
/// ```
/// use blockworld_solver::puzzle::Direction;
/// use blockworld_solver::report::format_moves;
/// assert_eq!(format_moves(&[Direction::Up, Direction::Left]), "U > L");
/// assert_eq!(format_moves(&[]), "");
/// ```
pub fn format_moves(moves: &[Direction]) -> String {
    moves
        .iter()
        .map(|direction| direction.to_char().to_string())
        .collect::<Vec<_>>()
        .join(" > ")
}

/// The solution path of a search followed by its [`Analysis`].
#[derive(Clone, Copy, Debug)]
pub struct SolutionReport<'a> {
    pub outcome: &'a SearchOutcome,
    /// Print every grid from the start state to the solved state instead of
    /// only the move sequence.
    pub full_state_display: bool,
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The {} was completed!\n", self.outcome.strategy)?;
        writeln!(f, "Here is the first solution found:")?;
        writeln!(f, "{SEPARATOR}\n")?;

        if self.full_state_display {
            for state in &self.outcome.states {
                write!(f, "{state}")?;
                writeln!(f, "\n{SEPARATOR}\n")?;
            }
        } else {
            let moves = self.outcome.moves();
            // A solved start state has no moves to list.
            if moves.is_empty() {
                writeln!(f, "Init")?;
            } else {
                writeln!(f, "Init > {}", format_moves(&moves))?;
            }
            writeln!(f, "\n{SEPARATOR}")?;
        }

        writeln!(f)?;
        write!(f, "{}", Analysis(self.outcome))
    }
}

/// The counters block of a single search.
#[derive(Clone, Copy, Debug)]
pub struct Analysis<'a>(pub &'a SearchOutcome);

impl fmt::Display for Analysis<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        writeln!(f, "Search Analysis")?;
        writeln!(f, "----------------")?;
        writeln!(f, "Search method used: {}", outcome.strategy)?;
        writeln!(
            f,
            "Time complexity (Nodes created): {}",
            outcome.metrics.time_complexity
        )?;
        writeln!(
            f,
            "Space complexity (Max nodes in memory): {}",
            outcome.metrics.space_complexity
        )?;
        writeln!(f, "Depth of the solution: {}", outcome.solution_depth)
    }
}

/// The averaged counters of a multi-run test, printed with two decimals.
#[derive(Clone, Copy, Debug)]
pub struct AveragesReport<'a>(pub &'a AverageStats);

impl fmt::Display for AveragesReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        writeln!(f, "Test Searches Completed!")?;
        writeln!(f, "========================\n")?;
        writeln!(f, "Search Analysis")?;
        writeln!(f, "------------------------")?;
        writeln!(f, "Search method used: {}", stats.strategy)?;
        writeln!(f, "Number of runs: {}", stats.runs)?;
        writeln!(f, "Average Time complexity: {:.2}", stats.time_complexity)?;
        writeln!(f, "Average Space complexity: {:.2}", stats.space_complexity)?;
        writeln!(
            f,
            "Average Depth of the solution: {:.2}",
            stats.solution_depth
        )
    }
}

/// Renders the solution of `outcome` followed by its search analysis.
///
/// # Arguments
/// * `outcome` - A finished search.
/// * `full_state_display` - Whether to print every intermediate grid.
///
/// # Returns
/// The full report text, ending with a newline.
pub fn format_solution(outcome: &SearchOutcome, full_state_display: bool) -> String {
    SolutionReport {
        outcome,
        full_state_display,
    }
    .to_string()
}

pub fn format_analysis(outcome: &SearchOutcome) -> String {
    Analysis(outcome).to_string()
}

pub fn format_averages(stats: &AverageStats) -> String {
    AveragesReport(stats).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{PuzzleState, AGENT_SYMBOL};
    use crate::search::{SearchEngine, SearchOptions, Strategy};

    fn two_by_two_outcome() -> SearchOutcome {
        SearchEngine::new(Strategy::BreadthFirst, SearchOptions::default())
            .run(PuzzleState::new(2).unwrap())
            .unwrap()
    }

    #[test]
    fn test_format_moves() {
        let moves = [Direction::Up, Direction::Left, Direction::Down];
        assert_eq!(format_moves(&moves), "U > L > D");
        assert_eq!(format_moves(&[Direction::Right]), "R");
    }

    #[test]
    fn test_move_list_report() {
        let report = format_solution(&two_by_two_outcome(), false);
        let expected = "\
The Breadth First Search was completed!

Here is the first solution found:
=================================

Init > L

=================================

Search Analysis
----------------
Search method used: Breadth First Search
Time complexity (Nodes created): 5
Space complexity (Max nodes in memory): 5
Depth of the solution: 1
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_full_state_report_lists_every_grid() {
        let report = format_solution(&two_by_two_outcome(), true);
        let start = format!("|  .  .  |\n|  A  {AGENT_SYMBOL}  |\n");
        let end = format!("|  .  .  |\n|  {AGENT_SYMBOL}  A  |\n");
        let start_at = report.find(&start).unwrap();
        let end_at = report.find(&end).unwrap();
        assert!(start_at < end_at);
        assert_eq!(report.matches(SEPARATOR).count(), 3);
        assert!(report.ends_with("Depth of the solution: 1\n"));
    }

    #[test]
    fn test_solved_start_reports_init_only() {
        // The start state carries the move that produced it; it must not be reported.
        let solved = PuzzleState::new(2).unwrap().moved(Direction::Left).unwrap();
        let outcome = SearchEngine::new(Strategy::AStar, SearchOptions::default())
            .run(solved)
            .unwrap();
        assert!(format_solution(&outcome, false).contains("\nInit\n"));
    }

    #[test]
    fn test_report_wrappers_print_like_the_helpers() {
        let outcome = two_by_two_outcome();
        let report = SolutionReport {
            outcome: &outcome,
            full_state_display: false,
        };
        assert_eq!(format!("{report}"), format_solution(&outcome, false));
        assert!(report.to_string().ends_with(&Analysis(&outcome).to_string()));
    }

    #[test]
    fn test_format_averages() {
        let stats = AverageStats {
            strategy: Strategy::IterativeDeepening,
            runs: 4,
            time_complexity: 10.5,
            space_complexity: 3.25,
            solution_depth: 2.0,
        };
        let report = format_averages(&stats);
        assert!(report.contains("Search method used: Iterative Deepening Search\n"));
        assert!(report.contains("Number of runs: 4\n"));
        assert!(report.contains("Average Time complexity: 10.50\n"));
        assert!(report.contains("Average Space complexity: 3.25\n"));
        assert!(report.contains("Average Depth of the solution: 2.00\n"));
    }
}
