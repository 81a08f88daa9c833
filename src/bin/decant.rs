use std::{
    fs,
    io::Read,
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use decant::{
    puzzle::{
        generate::{generate, GeneratorConfig},
        spec::{build_board, to_specs, PuzzleRequest},
    },
    solver::{
        cancel::CancelToken,
        engine::{Outcome, SearchEngine},
        plan::Plan,
        stats::render_stats_table,
    },
};

/// Water sort puzzle solver and generator.
#[derive(Debug, Parser)]
#[command(name = "decant", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a puzzle given as `{"bottles":[...]}` JSON.
    ///
    /// Exit codes: 0 solved, 1 invalid input, 2 no solution, 3 deadline
    /// elapsed before the search concluded.
    Solve {
        /// Puzzle file; reads stdin when omitted.
        input: Option<PathBuf>,

        /// Wall-clock budget in seconds; the search is cancelled
        /// cooperatively once it elapses.
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Print search counters to stderr after the solve.
        #[arg(long)]
        stats: bool,
    },
    /// Generate a solvable puzzle and print it in the request shape.
    Generate {
        #[arg(long, default_value_t = 4)]
        colors: usize,

        #[arg(long, default_value_t = 4)]
        capacity: usize,

        #[arg(long, default_value_t = 2)]
        empty_bottles: usize,

        /// Scramble steps; more steps generally means a harder puzzle.
        #[arg(long, default_value_t = 64)]
        steps: usize,

        /// Generation is deterministic for a given seed.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Debug, Serialize)]
struct SolveResponse {
    plan: Plan,
    steps: usize,
    success: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn fail(code: u8, message: String) -> ExitCode {
    let body = ErrorResponse { error: message };
    println!("{}", serde_json::to_string(&body).expect("error body serializes"));
    ExitCode::from(code)
}

fn read_input(input: Option<&PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn solve(input: Option<&PathBuf>, timeout: u64, stats: bool) -> ExitCode {
    let raw = match read_input(input) {
        Ok(raw) => raw,
        Err(err) => return fail(1, format!("cannot read input: {err}")),
    };
    let request: PuzzleRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(err) => return fail(1, format!("invalid request: {err}")),
    };
    let (board, _palette) = match build_board(&request.bottles) {
        Ok(built) => built,
        Err(err) => return fail(1, err.puzzle_error().to_string()),
    };

    let token = CancelToken::with_deadline(Duration::from_secs(timeout));
    let engine = SearchEngine::with_cancel(token);
    let (outcome, search_stats) = engine.solve(&board);
    if stats {
        eprint!("{}", render_stats_table(&search_stats));
    }

    match outcome {
        Outcome::Solved(plan) => {
            let response = SolveResponse {
                steps: plan.len(),
                plan,
                success: true,
            };
            println!(
                "{}",
                serde_json::to_string(&response).expect("response serializes")
            );
            ExitCode::SUCCESS
        }
        Outcome::NoSolution => fail(2, "no solution found".to_string()),
        Outcome::Cancelled => fail(3, format!("solve timed out after {timeout} seconds")),
    }
}

fn run_generate(config: &GeneratorConfig, seed: u64) -> ExitCode {
    let (board, palette) = match generate(config, seed) {
        Ok(generated) => generated,
        Err(err) => return fail(1, err.puzzle_error().to_string()),
    };
    let request = PuzzleRequest {
        bottles: to_specs(&board, &palette),
    };
    println!(
        "{}",
        serde_json::to_string(&request).expect("request serializes")
    );
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Solve {
            input,
            timeout,
            stats,
        } => solve(input.as_ref(), timeout, stats),
        Command::Generate {
            colors,
            capacity,
            empty_bottles,
            steps,
            seed,
        } => run_generate(
            &GeneratorConfig {
                colors,
                capacity,
                empty_bottles,
                scramble_steps: steps,
            },
            seed,
        ),
    }
}
