//! Built-in sample boards used by tests, benchmarks, and documentation.

use crate::solver::board::Board;
use crate::solver::hint::{Hint, HintSet};

fn board(rows: &[&[usize]], columns: &[&[usize]]) -> Board {
    let rows = HintSet::new(rows.iter().map(|b| Hint::new(b.to_vec())).collect());
    let columns = HintSet::new(columns.iter().map(|b| Hint::new(b.to_vec())).collect());
    Board::new(rows, columns)
}

/// 3×3 board whose single solution is the fully filled grid.
pub fn filled_square() -> Board {
    board(&[&[3], &[3], &[3]], &[&[3], &[3], &[3]])
}

/// 2×2 board whose row and column hints cannot be satisfied together:
/// the rows place two filled cells in total, but the columns demand three.
pub fn contradiction() -> Board {
    board(&[&[1], &[1]], &[&[2], &[1]])
}

/// 5×5 diamond with a unique solution.
pub fn heart() -> Board {
    board(
        &[&[1], &[3], &[5], &[3], &[1]],
        &[&[1], &[3], &[5], &[3], &[1]],
    )
}

/// n×n board with a single cell per row and column — `n!` solutions, which
/// makes it a convenient dial for search-space size in tests and benches.
pub fn permutation_grid(n: usize) -> Board {
    let hints: Vec<&[usize]> = std::iter::repeat(&[1usize][..]).take(n).collect();
    board(&hints, &hints)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::solver::board::CellState;
    use crate::solver::engine::{solve, SolveConfig, SolveMode};
    use crate::solver::strategy::SequentialStrategy;
    use crate::solver::validity;

    fn all_solutions() -> SolveConfig {
        SolveConfig {
            mode: SolveMode::AllSolutions,
            ..SolveConfig::default()
        }
    }

    #[test]
    fn heart_has_a_unique_diamond_solution() {
        let report = solve(&super::heart(), &SequentialStrategy, &all_solutions()).unwrap();
        assert_eq!(report.solutions.len(), 1);

        let solution = &report.solutions[0];
        assert!(validity::board_solved(solution));
        // The middle row is completely filled, the corners stay empty.
        assert!(solution.row(2).all(|c| c == CellState::Filled));
        assert_eq!(solution.cell(0, 0), CellState::Empty);
        assert_eq!(solution.cell(0, 2), CellState::Filled);
    }

    #[test]
    fn contradiction_hints_disagree_on_fill_count() {
        let board = super::contradiction();
        let total = |hints: &crate::solver::hint::HintSet| -> usize {
            hints.iter().map(|h| h.blocks().iter().sum::<usize>()).sum()
        };
        // No assignment can satisfy both dimensions: every filled cell is
        // counted once by each, so the totals would have to agree.
        assert_ne!(total(board.row_hints()), total(board.col_hints()));

        let report = solve(&board, &SequentialStrategy, &all_solutions()).unwrap();
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn permutation_grid_counts_factorially() {
        let report = solve(
            &super::permutation_grid(4),
            &SequentialStrategy,
            &all_solutions(),
        )
        .unwrap();
        assert_eq!(report.solutions.len(), 24);
    }
}
