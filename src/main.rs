use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nonosolve::error::Result;
use nonosolve::puzzle;
use nonosolve::solver::stats::render_report_table;
use nonosolve::solver::strategy::{
    FanOutStrategy, SearchStrategy, SequentialStrategy, ThreadPoolStrategy,
};
use nonosolve::solver::{solve, SolveConfig, SolveMode, SolveReport};

#[derive(Debug, Parser)]
#[command(name = "nonosolve", about = "Solve nonogram puzzles from JSON definitions.")]
struct Cli {
    /// Report progress and timing details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Sequential,
    Pool,
    FanOut,
}

impl Method {
    fn strategy(self) -> &'static dyn SearchStrategy {
        match self {
            Method::Sequential => &SequentialStrategy,
            Method::Pool => &ThreadPoolStrategy,
            Method::FanOut => &FanOutStrategy,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a single puzzle and print the board.
    Solve {
        /// Path to the puzzle definition.
        puzzle: PathBuf,

        #[arg(short, long, value_enum, default_value = "sequential")]
        method: Method,

        /// Worker threads for the pool method.
        #[arg(short, long, default_value_t = 2)]
        threads: usize,

        /// Queue-depth ceiling for pool backpressure.
        #[arg(short, long, default_value_t = 64)]
        queue: usize,

        /// Give up after this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Enumerate every solution instead of stopping at the first.
        #[arg(long)]
        all: bool,

        /// Write the solved grid(s) as JSON to this path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Time every requested method against every puzzle and report a table.
    Benchmark {
        /// Paths to the puzzle definitions.
        puzzles: Vec<PathBuf>,

        #[arg(short, long, value_enum, value_delimiter = ',',
              default_values = ["sequential", "pool"])]
        methods: Vec<Method>,

        /// Timed runs per puzzle/method pair.
        #[arg(long, default_value_t = 3)]
        trials: usize,

        #[arg(short, long, default_value_t = 2)]
        threads: usize,

        #[arg(short, long, default_value_t = 64)]
        queue: usize,

        #[arg(long, default_value_t = 10_000)]
        timeout_ms: u64,

        /// Also write the results as CSV to this path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(err) = run(cli.command) {
        error!("{}", err.inner());
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Solve {
            puzzle,
            method,
            threads,
            queue,
            timeout_ms,
            all,
            output,
        } => {
            let board = puzzle::load_board(&puzzle)?;
            let config = SolveConfig {
                mode: if all {
                    SolveMode::AllSolutions
                } else {
                    SolveMode::FirstSolution
                },
                workers: threads,
                queue_ceiling: queue,
                timeout: timeout_ms.map(Duration::from_millis),
            };

            info!(puzzle = %puzzle.display(), method = ?method, "solving");
            let report = solve(&board, method.strategy(), &config)?;

            if report.timed_out() {
                info!(
                    found = report.solutions.len(),
                    "deadline elapsed before the search finished"
                );
            }
            println!(
                "{} solution(s) found in {:.2?}",
                report.solutions.len(),
                report.elapsed
            );
            for solution in &report.solutions {
                println!("\n{solution}");
            }

            if let Some(path) = output {
                let snapshots: Vec<_> = report
                    .solutions
                    .iter()
                    .map(|b| b.rows_snapshot())
                    .collect();
                let json = serde_json::to_string_pretty(&snapshots)
                    .expect("board snapshots serialize");
                fs::write(&path, json).map_err(|e| {
                    nonosolve::error::SolverError::MissingData(format!(
                        "{}: {e}",
                        path.display()
                    ))
                })?;
                info!(path = %path.display(), "wrote solution snapshots");
            }
            Ok(())
        }
        Command::Benchmark {
            puzzles,
            methods,
            trials,
            threads,
            queue,
            timeout_ms,
            output,
        } => {
            let mut rows: Vec<(String, SolveReport)> = Vec::new();
            let mut csv = String::from("Puzzle,Width,Height,Method,Threads,AverageSeconds\n");

            for path in &puzzles {
                let board = puzzle::load_board(path)?;
                for method in &methods {
                    let config = SolveConfig {
                        mode: SolveMode::FirstSolution,
                        workers: threads,
                        queue_ceiling: queue,
                        timeout: Some(Duration::from_millis(timeout_ms)),
                    };

                    let mut total = Duration::ZERO;
                    let mut last = None;
                    for _ in 0..trials.max(1) {
                        let report = solve(&board, method.strategy(), &config)?;
                        total += report.elapsed;
                        last = Some(report);
                    }
                    let report = last.expect("at least one trial ran");
                    let average = total / trials.max(1) as u32;

                    csv.push_str(&format!(
                        "{},{},{},{:?},{},{:.6}\n",
                        path.display(),
                        board.width(),
                        board.height(),
                        method,
                        threads,
                        average.as_secs_f64()
                    ));
                    rows.push((
                        format!("{} / {:?}", path.display(), method),
                        report,
                    ));
                }
            }

            let labelled: Vec<(String, &SolveReport)> =
                rows.iter().map(|(label, r)| (label.clone(), r)).collect();
            println!("{}", render_report_table(&labelled));

            if let Some(path) = output {
                fs::write(&path, csv).map_err(|e| {
                    nonosolve::error::SolverError::MissingData(format!(
                        "{}: {e}",
                        path.display()
                    ))
                })?;
                info!(path = %path.display(), "wrote benchmark CSV");
            }
            Ok(())
        }
    }
}
