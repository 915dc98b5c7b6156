use crate::solver::board::{CellState, Line};
use crate::solver::hint::Hint;

/// Enumerates every legal placement of a hint's blocks on a line of
/// `line_length` cells.
///
/// Each result places the blocks in order, every block a contiguous run of
/// `Filled` separated from the next by at least one `Empty` cell; untouched
/// cells are `Empty`. Results come out leftmost-placement-first, which makes
/// sequential first-solution searches reproducible.
///
/// A hint with no blocks yields exactly one all-`Empty` line. A hint that
/// cannot fit in `line_length` yields no results at all — that is a normal
/// outcome, not an error.
pub fn line_permutations(hint: &Hint, line_length: usize) -> Vec<Line> {
    let mut results = Vec::new();
    let mut scratch = vec![CellState::Empty; line_length];
    place_blocks(hint, &mut scratch, 0, 0, &mut results);
    results
}

/// Places block `block_idx` at every feasible start position, recursing for
/// the remaining blocks. The start positions range over the slack left once
/// every later block reserves its minimum occupation.
fn place_blocks(
    hint: &Hint,
    scratch: &mut Line,
    block_idx: usize,
    pos: usize,
    results: &mut Vec<Line>,
) {
    if block_idx >= hint.len() {
        results.push(scratch.clone());
        return;
    }

    let block = hint.block(block_idx);
    let slack = scratch.len() as isize
        - hint.occupation(block_idx + 1)
        - block as isize
        - pos as isize;
    if slack <= 0 {
        // The remaining blocks cannot fit; this branch yields nothing.
        return;
    }

    for start in pos..pos + slack as usize {
        for cell in &mut scratch[start..start + block] {
            *cell = CellState::Filled;
        }
        place_blocks(hint, scratch, block_idx + 1, start + block + 1, results);
        for cell in &mut scratch[start..start + block] {
            *cell = CellState::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::solver::board::CellState::{Empty, Filled};

    #[test]
    fn single_block_filling_the_line() {
        let perms = line_permutations(&Hint::new(vec![1]), 1);
        assert_eq!(perms, vec![vec![Filled]]);
    }

    #[test]
    fn empty_hint_yields_one_blank_line() {
        let perms = line_permutations(&Hint::new(vec![]), 3);
        assert_eq!(perms, vec![vec![Empty, Empty, Empty]]);
    }

    #[test]
    fn two_blocks_enumerate_leftmost_first() {
        let perms = line_permutations(&Hint::new(vec![1, 1]), 4);
        assert_eq!(
            perms,
            vec![
                vec![Filled, Empty, Filled, Empty],
                vec![Filled, Empty, Empty, Filled],
                vec![Empty, Filled, Empty, Filled],
            ]
        );
    }

    #[test]
    fn oversized_hint_yields_nothing() {
        assert!(line_permutations(&Hint::new(vec![4]), 3).is_empty());
        assert!(line_permutations(&Hint::new(vec![2, 2]), 4).is_empty());
    }

    #[test]
    fn exact_fit_has_a_single_placement() {
        let perms = line_permutations(&Hint::new(vec![2, 1]), 4);
        assert_eq!(perms, vec![vec![Filled, Filled, Empty, Filled]]);
    }

    fn binomial(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        let mut result = 1usize;
        for i in 0..k {
            result = result * (n - i) / (i + 1);
        }
        result
    }

    /// Extracts the block-run structure of a generated line.
    fn runs(line: &[CellState]) -> Vec<usize> {
        let mut runs = Vec::new();
        let mut current = 0usize;
        for cell in line {
            match cell {
                Filled => current += 1,
                _ => {
                    if current > 0 {
                        runs.push(current);
                        current = 0;
                    }
                }
            }
        }
        if current > 0 {
            runs.push(current);
        }
        runs
    }

    proptest! {
        #[test]
        fn every_line_realizes_the_hint(
            blocks in proptest::collection::vec(1usize..4, 0..4),
            extra in 0usize..6,
        ) {
            let hint = Hint::new(blocks.clone());
            let min_len = hint.occupation(0).max(0) as usize;
            let line_length = min_len + extra;
            let perms = line_permutations(&hint, line_length);

            // Count matches choosing positions for the free slack cells.
            let slack = line_length as isize - hint.occupation(0);
            let expected = if slack < 0 {
                0
            } else {
                binomial(slack as usize + blocks.len(), blocks.len())
            };
            prop_assert_eq!(perms.len(), expected);

            let filled: usize = blocks.iter().sum();
            for line in &perms {
                prop_assert_eq!(line.len(), line_length);
                prop_assert_eq!(line.iter().filter(|c| **c == Filled).count(), filled);
                prop_assert_eq!(runs(line), blocks.clone());
            }
        }
    }
}
