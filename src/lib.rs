//! Nonosolve is a nonogram (picross) solver built around a single
//! backtracking search core and pluggable execution strategies.
//!
//! A puzzle is a grid plus row and column hints — ordered block-length
//! sequences constraining each line. The engine commits the board one row
//! at a time: a permutation generator enumerates every legal placement of a
//! row's blocks, an incremental validity checker prunes candidates whose
//! columns can no longer match their hints, and surviving candidates are
//! handed to an execution strategy that decides where the next recursive
//! step runs — inline, on a bounded worker pool with queue-depth
//! backpressure, or fanned out across spawned threads. Cancellation (first
//! solution found, or deadline elapsed) is a cooperative flag polled at
//! expansion boundaries.
//!
//! # Example
//!
//! ```
//! use nonosolve::solver::board::Board;
//! use nonosolve::solver::hint::{Hint, HintSet};
//! use nonosolve::solver::strategy::SequentialStrategy;
//! use nonosolve::solver::{solve, SolveConfig, SolveMode};
//!
//! // 2×2 puzzle: one cell in the first row, both cells in the second.
//! let rows = HintSet::new(vec![Hint::new(vec![1]), Hint::new(vec![2])]);
//! let columns = HintSet::new(vec![Hint::new(vec![1]), Hint::new(vec![2])]);
//! let board = Board::new(rows, columns);
//!
//! let config = SolveConfig {
//!     mode: SolveMode::AllSolutions,
//!     ..SolveConfig::default()
//! };
//! let report = solve(&board, &SequentialStrategy, &config).unwrap();
//! assert_eq!(report.solutions.len(), 1);
//! ```
//!
//! Absence of a solution is a normal outcome, not an error: an unsolvable
//! puzzle produces an empty solution set, and an elapsed deadline produces
//! whatever was found so far, flagged as timed out.

pub mod error;
pub mod puzzle;
pub mod samples;
pub mod solver;
