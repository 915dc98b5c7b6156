use std::fmt;
use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::solver::hint::HintSet;

/// The tri-state value of a single cell.
///
/// `Unknown` only exists above the search frontier: every row below a
/// board's target row is fully committed to `Filled`/`Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellState {
    Unknown,
    Filled,
    Empty,
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Unknown => write!(f, " "),
            CellState::Filled => write!(f, "■"),
            CellState::Empty => write!(f, "."),
        }
    }
}

/// A fully materialized candidate line, as produced by the permutation
/// generator.
pub type Line = Vec<CellState>;

/// The full puzzle state: cell grid, both hint sets, and the search cursor.
///
/// A board is logically immutable once created. Branching the search calls
/// [`Board::commit_row`], which produces a new board sharing the untouched
/// rows of the grid structurally (and the hint sets by reference), so the
/// per-branch allocation cost stays proportional to one row rather than the
/// whole grid. This also makes boards safe to hand to sibling-exploring
/// workers without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Vector<Vector<CellState>>,
    row_hints: Arc<HintSet>,
    col_hints: Arc<HintSet>,
    target_row: usize,
}

impl Board {
    /// Creates an all-`Unknown` board shaped by its hint sets: one row per
    /// row hint, one column per column hint.
    pub fn new(row_hints: HintSet, col_hints: HintSet) -> Self {
        let width = col_hints.len();
        let height = row_hints.len();
        let blank_row: Vector<CellState> = std::iter::repeat(CellState::Unknown)
            .take(width)
            .collect();
        let grid = std::iter::repeat(blank_row).take(height).collect();
        Self {
            grid,
            row_hints: Arc::new(row_hints),
            col_hints: Arc::new(col_hints),
            target_row: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.col_hints.len()
    }

    pub fn height(&self) -> usize {
        self.row_hints.len()
    }

    pub fn row_hints(&self) -> &HintSet {
        &self.row_hints
    }

    pub fn col_hints(&self) -> &HintSet {
        &self.col_hints
    }

    /// The next row index awaiting commitment.
    pub fn target_row(&self) -> usize {
        self.target_row
    }

    /// True once every row has been committed.
    pub fn is_final(&self) -> bool {
        self.target_row >= self.height()
    }

    pub fn cell(&self, row: usize, col: usize) -> CellState {
        self.grid[row][col]
    }

    /// The cells of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = CellState> + '_ {
        self.grid.iter().map(move |row| row[col])
    }

    /// The cells of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = CellState> + '_ {
        self.grid[row].iter().copied()
    }

    /// Branches the search: a new board with the target row committed to
    /// `line` and the cursor advanced. `self` is left untouched.
    pub fn commit_row(&self, line: Line) -> Board {
        debug_assert_eq!(line.len(), self.width());
        debug_assert!(!self.is_final());
        debug_assert!(line.iter().all(|c| *c != CellState::Unknown));
        Board {
            grid: self.grid.update(self.target_row, line.into_iter().collect()),
            row_hints: Arc::clone(&self.row_hints),
            col_hints: Arc::clone(&self.col_hints),
            target_row: self.target_row + 1,
        }
    }

    /// A plain copy of the grid, for rendering and serialization.
    pub fn rows_snapshot(&self) -> Vec<Vec<CellState>> {
        self.grid
            .iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.iter() {
            for cell in row.iter() {
                write!(f, " {cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
