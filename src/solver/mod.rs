//! The constraint-search engine: hint model, board state, line permutation
//! generation, incremental validity checking, the row-by-row backtracking
//! core, and the execution strategies that schedule it.

pub mod board;
pub mod engine;
pub mod hint;
pub mod permutation;
pub mod stats;
pub mod strategy;
pub mod validity;

pub use engine::{solve, Completion, SolveConfig, SolveMode, SolveReport};
