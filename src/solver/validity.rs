//! Incremental line validation — the search's sole pruning oracle.
//!
//! One cumulative scan covers both uses: while a line still ends in
//! `Unknown` cells the committed prefix is checked against the hint
//! (a run may still grow into the frontier, so the trailing run only has to
//! stay within the current block), and once a line carries no `Unknown` at
//! all the same scan enforces the exact, final semantics.

use crate::solver::board::{Board, CellState};
use crate::solver::hint::Hint;

/// Whether the committed prefix of a line is still consistent with its hint.
///
/// Scans left to right tracking the current `Filled` run and an index into
/// the hint's blocks. Leaving a run (via `Empty`) demands an exact block
/// match; a run in progress may never exceed the current block; running out
/// of blocks fails immediately. Hitting `Unknown` accepts the prefix — all
/// later cells are uncommitted. On a fully committed line, every block must
/// be matched and consumed.
pub fn line_consistent(cells: impl Iterator<Item = CellState>, hint: &Hint) -> bool {
    let mut x = 0usize; // next block to match
    let mut run = 0usize; // current filled run length

    for cell in cells {
        match cell {
            CellState::Filled => {
                run += 1;
                if x >= hint.len() || run > hint.block(x) {
                    return false;
                }
            }
            CellState::Empty => {
                if run > 0 {
                    if hint.block(x) != run {
                        return false;
                    }
                    x += 1;
                    run = 0;
                }
            }
            CellState::Unknown => return true,
        }
    }

    if run > 0 {
        if hint.block(x) != run {
            return false;
        }
        x += 1;
    }
    x == hint.len()
}

/// Strict final check: the line is fully committed and matches the hint
/// exactly. Any `Unknown` cell fails.
pub fn line_solved(cells: impl Iterator<Item = CellState>, hint: &Hint) -> bool {
    let cells: Vec<CellState> = cells.collect();
    !cells.contains(&CellState::Unknown) && line_consistent(cells.into_iter(), hint)
}

pub fn column_consistent(board: &Board, col: usize) -> bool {
    line_consistent(board.column(col), &board.col_hints()[col])
}

/// Runs the pruning oracle over every column. Called once per committed row.
pub fn columns_consistent(board: &Board) -> bool {
    (0..board.width()).all(|col| column_consistent(board, col))
}

/// Confirms a completed board: every row and column fully committed and
/// matching its hint.
pub fn board_solved(board: &Board) -> bool {
    (0..board.height()).all(|row| line_solved(board.row(row), &board.row_hints()[row]))
        && (0..board.width()).all(|col| line_solved(board.column(col), &board.col_hints()[col]))
}
