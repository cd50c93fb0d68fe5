use crate::error::Result;
use crate::puzzle::PuzzleState;
use crate::report::{format_averages, format_solution};
use crate::search::{AverageStats, SearchEngine, SearchOptions, SearchOutcome, Strategy};

/// Where the search starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InitialState {
    /// Tiles along the bottom row, agent in the bottom-right corner.
    #[default]
    Default,
    /// Agent position plus one `(row, col)` pair per tile in label order.
    Custom {
        agent_row: usize,
        agent_col: usize,
        tile_positions: Vec<usize>,
    },
    /// A fully specified grid, e.g. parsed with [`crate::utils::state_from_str_array`].
    Layout(PuzzleState),
}

/// Everything needed to run a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub dimension: usize,
    pub strategy: Strategy,
    pub initial_state: InitialState,
    pub randomize_moves: bool,
    /// Report every intermediate grid instead of only the move sequence.
    pub full_state_display: bool,
    pub verbose_trace: bool,
    pub max_live_nodes: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            dimension: 4,
            strategy: Strategy::BreadthFirst,
            initial_state: InitialState::Default,
            randomize_moves: false,
            full_state_display: false,
            verbose_trace: false,
            max_live_nodes: None,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Builds and validates the start state.
    ///
    /// A `Layout` start state brings its own dimension, which overrides `dimension`.
    pub fn build_initial_state(&self) -> Result<PuzzleState> {
        match &self.initial_state {
            InitialState::Default => PuzzleState::new(self.dimension),
            InitialState::Custom {
                agent_row,
                agent_col,
                tile_positions,
            } => PuzzleState::with_positions(self.dimension, *agent_row, *agent_col, tile_positions),
            InitialState::Layout(state) => Ok(state.clone()),
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            randomize_moves: self.randomize_moves,
            verbose_trace: self.verbose_trace,
            max_live_nodes: self.max_live_nodes,
            seed: self.seed,
        }
    }

    fn engine(&self) -> SearchEngine {
        SearchEngine::new(self.strategy, self.search_options())
    }
}

/// Solves the puzzle described by `config`.
///
/// The start state is validated before any search work begins.
///
/// # Examples
/// ```
/// use blockworld_solver::search::Strategy;
/// use blockworld_solver::solver::{solve, InitialState, SolverConfig};
///
/// let config = SolverConfig {
///     dimension: 2,
///     strategy: Strategy::IterativeDeepening,
///     ..SolverConfig::default()
/// };
/// assert_eq!(solve(&config).unwrap().solution_depth, 1);
///
/// let broken = SolverConfig {
///     initial_state: InitialState::Custom { agent_row: 0, agent_col: 0, tile_positions: vec![1, 1] },
///     ..SolverConfig::default()
/// };
/// assert!(solve(&broken).is_err());
/// ```
pub fn solve(config: &SolverConfig) -> Result<SearchOutcome> {
    let initial = config.build_initial_state()?;
    config.engine().run(initial)
}

/// Solves the puzzle and renders the report.
pub fn solve_report(config: &SolverConfig) -> Result<String> {
    let outcome = solve(config)?;
    Ok(format_solution(&outcome, config.full_state_display))
}

/// Runs the configured search `times` times and averages the results.
pub fn solve_many(config: &SolverConfig, times: usize) -> Result<AverageStats> {
    let initial = config.build_initial_state()?;
    config.engine().run_many(&initial, times)
}

/// Runs the configured search `times` times and renders the averages.
pub fn solve_many_report(config: &SolverConfig, times: usize) -> Result<String> {
    let stats = solve_many(config, times)?;
    Ok(format_averages(&stats))
}
