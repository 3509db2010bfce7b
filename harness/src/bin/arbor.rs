//! `arbor`: read a board, solve it, write the result.

use std::path::PathBuf;
use std::process::ExitCode;

use arbor_harness::board_file::{format_board, read_board_file, write_board_file};
use arbor_harness::config::SolverConfig;
use arbor_harness::runner::{benchmark, solve, RunError, SolveOutcome, Unsolvable};
use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "arbor")]
#[command(about = "Solve a Sudoku board by guessing and propagating constraints")]
#[command(version)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Board to solve.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Where to write the solved board.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Benchmark budget in seconds; 0 skips the benchmark.
    #[arg(long, value_name = "SECONDS")]
    bench_seconds: Option<f64>,

    /// Write a JSON solve report here.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log every search expansion.
    #[arg(long)]
    trace_search: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_config(&self) -> Result<SolverConfig, RunError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::load(path)?,
            None => SolverConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(seconds) = self.bench_seconds {
            config.bench_seconds = seconds;
        }
        if self.report.is_some() {
            config.report.clone_from(&self.report);
        }
        config.trace_search |= self.trace_search;
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether the board was solved.
fn run(cli: &Cli) -> Result<bool, RunError> {
    let config = cli.resolve_config()?;
    let policy = config.sudoku_policy();
    let cells = read_board_file(&config.input)?;
    info!(input = %config.input.display(), "board loaded");

    let budget = config.bench_budget();
    if !budget.is_zero() {
        let summary = benchmark(&cells, &policy, budget)?;
        println!(
            "solved board {} times in avg of {:.6} seconds",
            summary.iterations,
            summary.mean_seconds()
        );
    }

    let outcome = solve(&cells, &policy)?;
    if let Some(path) = &config.report {
        outcome.report().write(path)?;
    }
    match outcome {
        SolveOutcome::Solved(solved) => {
            print!("{}", format_board(&solved.cells));
            write_board_file(&config.output, &solved.cells)?;
            println!(
                "Found solution at depth {} after expanding {} nodes",
                solved.depth, solved.stats.expansions
            );
            Ok(true)
        }
        SolveOutcome::Unsolvable(Unsolvable::Contradiction(reason)) => {
            println!("No solution: {reason}");
            Ok(false)
        }
        SolveOutcome::Unsolvable(Unsolvable::Exhausted(stats)) => {
            println!("No solution found after expanding {} nodes", stats.expansions);
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            error!(%err, "arbor failed");
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
