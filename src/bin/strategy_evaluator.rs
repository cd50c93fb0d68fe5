use anyhow::Result;
use blockworld_solver::search::{AverageStats, Strategy};
use blockworld_solver::solver::{solve_many, SolverConfig};
use clap::Parser;
use log::warn;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares the search strategies on one grid", long_about = None)]
struct Args {
    /// Grid side length
    #[clap(short, long, default_value_t = 3)]
    dimension: usize,

    /// Runs per strategy
    #[clap(short = 'n', long, default_value_t = 10)]
    runs: usize,

    /// Shuffle the move order before every expansion
    #[clap(short, long)]
    random_moves: bool,

    /// First seed; each strategy gets its own seed derived from it
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Live node budget per search
    #[clap(long, default_value_t = 5_000_000)]
    max_nodes: usize,

    /// Leave depth-first search out (it rarely terminates on grids above 2x2)
    #[clap(long)]
    skip_dfs: bool,
}

/// Seed of the `index`-th strategy, wrapping around at `u64::MAX`.
fn strategy_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let strategies: Vec<Strategy> = Strategy::ALL
        .into_iter()
        .filter(|s| !(args.skip_dfs && *s == Strategy::DepthFirst))
        .collect();

    println!(
        "Evaluating {} strategies on a {}x{} grid, {} run(s) each...",
        strategies.len(),
        args.dimension,
        args.dimension,
        args.runs
    );

    let mut results: Vec<AverageStats> = Vec::new();
    for (i, strategy) in strategies.iter().enumerate() {
        let config = SolverConfig {
            dimension: args.dimension,
            strategy: *strategy,
            randomize_moves: args.random_moves,
            max_live_nodes: Some(args.max_nodes),
            seed: Some(strategy_seed(args.seed, i)),
            ..SolverConfig::default()
        };
        match solve_many(&config, args.runs) {
            Ok(stats) => {
                println!("  {:<28} done", strategy.full_name());
                results.push(stats);
            }
            Err(err) => {
                // One strategy running out of nodes should not stop the comparison.
                warn!("{} gave up: {}", strategy, err);
                println!("  {:<28} gave up: {}", strategy.full_name(), err);
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    if results.is_empty() {
        println!("No strategy found a solution.");
        return Ok(());
    }

    // Sort by average nodes created, ascending
    results.sort_by(|a, b| a.time_complexity.total_cmp(&b.time_complexity));

    println!(
        "{:<28} {:>14} {:>14} {:>10}",
        "Strategy", "Avg created", "Avg peak", "Avg depth"
    );
    for stats in &results {
        println!(
            "{:<28} {:>14.2} {:>14.2} {:>10.2}",
            stats.strategy.full_name(),
            stats.time_complexity,
            stats.space_complexity,
            stats.solution_depth
        );
    }

    if let Some(best) = results.first() {
        println!("\nFewest nodes created: {}", best.strategy);
    }
    Ok(())
}
