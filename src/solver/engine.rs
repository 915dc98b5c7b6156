use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, SolverError};
use crate::solver::board::Board;
use crate::solver::permutation::line_permutations;
use crate::solver::stats::{SearchStats, StatsRecorder};
use crate::solver::strategy::SearchStrategy;
use crate::solver::validity;

/// Whether the search stops at the first completed board or exhausts the
/// whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    FirstSolution,
    AllSolutions,
}

/// Caller-owned configuration for one solve invocation.
///
/// The worker pool's size and queue ceiling are fixed for the lifetime of
/// the invocation; there are no process-global knobs.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub mode: SolveMode,
    /// Worker threads for the pool strategy. Must be at least 1.
    pub workers: usize,
    /// Backpressure threshold: a recursive step is queued only while the
    /// number of queued-but-not-started tasks is at or below this ceiling,
    /// and runs inline on the calling worker otherwise.
    pub queue_ceiling: usize,
    /// Wall-clock deadline for the whole invocation. `None` means unbounded.
    pub timeout: Option<Duration>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            mode: SolveMode::FirstSolution,
            workers: num_cpus::get(),
            queue_ceiling: 64,
            timeout: None,
        }
    }
}

/// How a solve invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The search tree was fully explored.
    Exhausted,
    /// First-solution mode found a solution and stopped sibling work.
    FirstSolutionFound,
    /// The deadline elapsed before the search naturally terminated.
    TimedOut,
}

/// The outcome of one solve invocation: whatever solutions were recorded,
/// wall-clock time, how the search ended, and search counters.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solutions: Vec<Board>,
    pub elapsed: Duration,
    pub completion: Completion,
    pub stats: SearchStats,
}

impl SolveReport {
    pub fn timed_out(&self) -> bool {
        self.completion == Completion::TimedOut
    }
}

/// Concurrently appended collection of completed boards.
///
/// Appends are serialized under a mutex; a board never becomes visible to
/// readers until its append has completed.
#[derive(Debug, Default)]
pub struct SolutionSet {
    inner: Mutex<Vec<Board>>,
}

impl SolutionSet {
    fn new() -> Self {
        Self::default()
    }

    fn push(&self, board: Board) {
        self.inner.lock().expect("solution set poisoned").push(board);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("solution set poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_boards(self) -> Vec<Board> {
        self.inner.into_inner().expect("solution set poisoned")
    }
}

/// Cooperative cancellation: an atomic flag raised on first success (in
/// first-solution mode) combined with an optional wall-clock deadline.
///
/// No strategy interrupts an in-progress column scan or permutation
/// enumeration; the token is only polled at expansion boundaries.
#[derive(Debug)]
pub struct CancellationToken {
    flag: AtomicBool,
    deadline: Option<Instant>,
}

impl CancellationToken {
    fn new(timeout: Option<Duration>) -> Self {
        Self {
            flag: AtomicBool::new(false),
            deadline: timeout.map(|t| Instant::now() + t),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire) || self.deadline_elapsed()
    }

    pub fn deadline_elapsed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Shared state for one solve invocation: the solution set, the
/// cancellation token, and the search counters. Strategies hand a reference
/// to every worker; boards themselves are never shared mutably.
#[derive(Debug)]
pub struct SearchContext {
    mode: SolveMode,
    solutions: SolutionSet,
    cancel: CancellationToken,
    stats: StatsRecorder,
}

impl SearchContext {
    pub fn new(mode: SolveMode, timeout: Option<Duration>) -> Self {
        Self {
            mode,
            solutions: SolutionSet::new(),
            cancel: CancellationToken::new(timeout),
            stats: StatsRecorder::default(),
        }
    }

    pub fn mode(&self) -> SolveMode {
        self.mode
    }

    pub fn solutions(&self) -> &SolutionSet {
        &self.solutions
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn should_terminate(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    /// Records a completed board. In first-solution mode this also raises
    /// the termination flag so sibling branches stop producing work.
    pub fn record_solution(&self, board: Board) {
        debug_assert!(board.is_final());
        self.solutions.push(board);
        self.stats.solution_recorded();
        if self.mode == SolveMode::FirstSolution {
            self.cancel.cancel();
        }
    }

    /// Classifies how the invocation ended, once a strategy has drained.
    pub fn completion(&self) -> Completion {
        if self.mode == SolveMode::FirstSolution && !self.solutions.is_empty() {
            Completion::FirstSolutionFound
        } else if self.cancel.deadline_elapsed() {
            Completion::TimedOut
        } else {
            Completion::Exhausted
        }
    }

    fn into_report(self, elapsed: Duration) -> SolveReport {
        let completion = self.completion();
        SolveReport {
            completion,
            elapsed,
            stats: self.stats.snapshot(),
            solutions: self.solutions.into_boards(),
        }
    }
}

/// The capability interface a strategy supplies to the search core: where
/// the recursive step for a surviving candidate runs, and when to stop.
pub trait Executor {
    /// Hands over a non-final, column-consistent board for further
    /// expansion. The implementation decides whether that happens inline,
    /// on a pooled worker, or on a freshly spawned thread.
    fn submit(&self, board: Board);

    fn should_terminate(&self) -> bool;
}

/// One step of the row-by-row backtracking search.
///
/// Generates every permutation of the target row, commits each into a
/// candidate board, prunes candidates whose columns are no longer
/// consistent, records completed boards, and submits the rest back to the
/// executor. A branch where no candidate survives is exhausted — the
/// function simply returns, which is normal backtracking rather than a
/// failure.
pub fn expand(ctx: &SearchContext, executor: &dyn Executor, board: Board) {
    if executor.should_terminate() {
        return;
    }
    ctx.stats().node_expanded();

    let row = board.target_row();
    let hint = &board.row_hints()[row];

    for line in line_permutations(hint, board.width()) {
        if executor.should_terminate() {
            return;
        }
        ctx.stats().candidate_generated();

        let candidate = board.commit_row(line);
        if !validity::columns_consistent(&candidate) {
            ctx.stats().candidate_pruned();
            continue;
        }

        if candidate.is_final() {
            ctx.record_solution(candidate);
        } else {
            executor.submit(candidate);
        }
    }
}

/// Solves a board with the given strategy and configuration.
///
/// Never fails for "no solution found": an unsolvable puzzle yields an
/// empty solution set with [`Completion::Exhausted`], and an elapsed
/// deadline yields whatever was found so far with [`Completion::TimedOut`].
/// Configuration problems (a zero-sized worker pool) are the only errors,
/// surfaced before any search work begins.
pub fn solve(
    board: &Board,
    strategy: &dyn SearchStrategy,
    config: &SolveConfig,
) -> Result<SolveReport> {
    if config.workers == 0 {
        return Err(SolverError::InvalidWorkerConfig(
            "worker count must be at least 1".to_string(),
        )
        .into());
    }

    let ctx = SearchContext::new(config.mode, config.timeout);
    let started = Instant::now();

    if board.is_final() {
        // Degenerate zero-row board: nothing to search, just confirm.
        if validity::board_solved(board) {
            ctx.record_solution(board.clone());
        }
    } else {
        strategy.run(&ctx, board.clone(), config)?;
    }

    let elapsed = started.elapsed();
    let report = ctx.into_report(elapsed);
    debug!(
        strategy = strategy.name(),
        solutions = report.solutions.len(),
        nodes = report.stats.nodes_expanded,
        pruned = report.stats.candidates_pruned,
        ?elapsed,
        completion = ?report.completion,
        "solve finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::board::CellState;
    use crate::solver::hint::{Hint, HintSet};
    use crate::solver::strategy::SequentialStrategy;

    fn all_solutions() -> SolveConfig {
        SolveConfig {
            mode: SolveMode::AllSolutions,
            ..SolveConfig::default()
        }
    }

    #[test]
    fn filled_square_has_the_single_full_solution() {
        let board = crate::samples::filled_square();
        let report = solve(&board, &SequentialStrategy, &all_solutions()).unwrap();

        assert_eq!(report.completion, Completion::Exhausted);
        assert_eq!(report.solutions.len(), 1);
        let solution = &report.solutions[0];
        for row in 0..3 {
            assert!(solution.row(row).all(|c| c == CellState::Filled));
        }
        assert!(validity::board_solved(solution));
    }

    #[test]
    fn contradictory_puzzle_yields_empty_set_without_error() {
        let board = crate::samples::contradiction();
        let report = solve(&board, &SequentialStrategy, &all_solutions()).unwrap();
        assert_eq!(report.completion, Completion::Exhausted);
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn first_solution_mode_stops_after_one() {
        // Two diagonal solutions exist; first-solution mode records one.
        let board = crate::samples::permutation_grid(2);
        let config = SolveConfig {
            mode: SolveMode::FirstSolution,
            ..SolveConfig::default()
        };
        let report = solve(&board, &SequentialStrategy, &config).unwrap();
        assert_eq!(report.completion, Completion::FirstSolutionFound);
        assert_eq!(report.solutions.len(), 1);
        assert!(validity::board_solved(&report.solutions[0]));
    }

    #[test]
    fn zero_workers_is_a_config_error() {
        let board = crate::samples::filled_square();
        let config = SolveConfig {
            workers: 0,
            ..SolveConfig::default()
        };
        let err = solve(&board, &SequentialStrategy, &config).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::InvalidWorkerConfig(_)
        ));
    }

    #[test]
    fn zero_height_board_is_confirmed_directly() {
        let board = Board::new(
            HintSet::new(vec![]),
            HintSet::new(vec![Hint::new(vec![]), Hint::new(vec![])]),
        );
        let report = solve(&board, &SequentialStrategy, &all_solutions()).unwrap();
        assert_eq!(report.solutions.len(), 1);

        let board = Board::new(HintSet::new(vec![]), HintSet::new(vec![Hint::new(vec![1])]));
        let report = solve(&board, &SequentialStrategy, &all_solutions()).unwrap();
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn solve_is_idempotent_for_all_solutions() {
        let board = crate::samples::permutation_grid(3);
        let config = all_solutions();
        let mut first: Vec<_> = solve(&board, &SequentialStrategy, &config)
            .unwrap()
            .solutions
            .iter()
            .map(Board::rows_snapshot)
            .collect();
        let mut second: Vec<_> = solve(&board, &SequentialStrategy, &config)
            .unwrap()
            .solutions
            .iter()
            .map(Board::rows_snapshot)
            .collect();
        first.sort();
        second.sort();
        assert_eq!(first.len(), 6); // 3! placements of one cell per row/column
        assert_eq!(first, second);
    }
}
