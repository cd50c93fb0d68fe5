use anyhow::{bail, Context, Result};
use blockworld_solver::search::Strategy;
use blockworld_solver::solver::{solve_many_report, solve_report, InitialState, SolverConfig};
use blockworld_solver::utils::{parse_coordinates, parse_position, state_from_str_array};
use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Grid side length (d x d grid with d - 1 tiles)
    #[clap(short, long, default_value_t = 4)]
    dimension: usize,

    /// Search strategy: B (breadth-first), D (depth-first), I (iterative deepening) or A (A*)
    #[clap(short, long, default_value = "B")]
    strategy: Strategy,

    /// Custom agent position as ROW,COL (requires --tiles)
    #[clap(long, requires = "tiles")]
    agent: Option<String>,

    /// Custom tile positions as R,C pairs in label order, e.g. 2,0,2,1,3,1
    #[clap(long, requires = "agent")]
    tiles: Option<String>,

    /// Path to a grid layout file ('.' empty, A-Z tiles, '*' agent)
    #[clap(long, conflicts_with_all = ["agent", "tiles"])]
    layout: Option<PathBuf>,

    /// Shuffle the move order before every expansion
    #[clap(short, long)]
    random_moves: bool,

    /// Seed for the move shuffling
    #[clap(long)]
    seed: Option<u64>,

    /// Print every intermediate grid instead of only the moves
    #[clap(short, long)]
    full_display: bool,

    /// Log every node the search visits
    #[clap(short, long)]
    verbose: bool,

    /// Abort once this many nodes are alive at the same time
    #[clap(long)]
    max_nodes: Option<usize>,

    /// Run the search this many times and print averaged statistics
    #[clap(long)]
    runs: Option<usize>,
}

fn read_layout_file(path: &PathBuf) -> Result<InitialState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file {}", path.display()))?;
    let rows: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let state = state_from_str_array(&rows).context("Invalid layout")?;
    Ok(InitialState::Layout(state))
}

fn initial_state(args: &Args) -> Result<InitialState> {
    if let Some(path) = &args.layout {
        return read_layout_file(path);
    }
    match (&args.agent, &args.tiles) {
        (Some(agent), Some(tiles)) => {
            let (agent_row, agent_col) = parse_position(agent).context("Invalid --agent")?;
            let tile_positions = parse_coordinates(tiles).context("Invalid --tiles")?;
            Ok(InitialState::Custom {
                agent_row,
                agent_col,
                tile_positions,
            })
        }
        (None, None) => Ok(InitialState::Default),
        _ => bail!("--agent and --tiles must be given together"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let config = SolverConfig {
        dimension: args.dimension,
        strategy: args.strategy,
        initial_state: initial_state(&args)?,
        randomize_moves: args.random_moves,
        full_state_display: args.full_display,
        verbose_trace: args.verbose,
        max_live_nodes: args.max_nodes,
        seed: args.seed,
    };

    let initial = config
        .build_initial_state()
        .context("Invalid initial state")?;
    println!("Initial state:\n{}", initial);
    println!("Finding a solution with {}...\n", config.strategy);

    let report = match args.runs {
        Some(times) => solve_many_report(&config, times),
        None => solve_report(&config),
    }
    .with_context(|| format!("{} failed", config.strategy))?;
    println!("{}", report);
    Ok(())
}
