use blockworld_solver::puzzle::{Direction, PuzzleState};
use clap::Parser;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Move the agent yourself", long_about = None)]
struct Args {
    /// Grid side length
    #[clap(short, long, default_value_t = 4)]
    dimension: usize,
}

fn main() {
    let args = Args::parse();
    let mut state = match PuzzleState::new(args.dimension) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };
    let mut history: Vec<PuzzleState> = Vec::new();
    println!("Welcome to Blockworld!");
    println!("Bring tile A to row 1, B to row 2, ... all in column 1.");

    loop {
        println!("---------------------");
        println!(
            "Moves: {}, Manhattan distance: {}",
            history.len(),
            state.distance_to_solution()
        );
        print!("{}", state);

        if state.is_solved() {
            println!();
            println!("---------------------");
            println!("Solved in {} moves!", history.len());
            println!("---------------------");
            break;
        }

        print!("Enter moves (U/L/D/R, e.g. 'ulld'), 'b' to go back, 'q' to quit: ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "b" {
            match history.pop() {
                Some(previous) => {
                    state = previous;
                    println!("Move undone.");
                }
                None => println!("Already at the initial state."),
            }
            continue;
        }

        for ch in trimmed_input.chars().filter(|c| !c.is_whitespace()) {
            let direction = match Direction::try_from(ch) {
                Ok(direction) => direction,
                Err(err) => {
                    println!("{}", err);
                    break;
                }
            };
            let previous = state.clone();
            match state.apply_move(direction) {
                Ok(()) => history.push(previous),
                Err(err) => {
                    println!("{}", err);
                    break;
                }
            }
        }
    }
}
