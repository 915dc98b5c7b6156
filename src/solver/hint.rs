use std::ops::Index;

use serde::{Deserialize, Serialize};

/// The ordered block-length sequence constraining a single row or column.
///
/// A hint like `[3, 1]` over a line of length 6 means "a run of three filled
/// cells, then at least one empty cell, then a run of one filled cell".
/// Hints are immutable after construction and shared between boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hint {
    blocks: Vec<usize>,
}

impl Hint {
    pub fn new(blocks: Vec<usize>) -> Self {
        Self { blocks }
    }

    /// Number of blocks in the hint.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, i: usize) -> usize {
        self.blocks[i]
    }

    pub fn blocks(&self) -> &[usize] {
        &self.blocks
    }

    /// Minimum space the blocks from index `p` onward require: their summed
    /// lengths plus one separating gap between each pair.
    ///
    /// The result is `-1` when `p` is past the last block (an empty suffix
    /// occupies no cells and "refunds" the gap that would have preceded it).
    /// The permutation generator's slack formula relies on that value, so
    /// this returns a signed quantity.
    pub fn occupation(&self, p: usize) -> isize {
        let start = p.min(self.blocks.len());
        let sum: usize = self.blocks[start..].iter().sum();
        sum as isize + self.blocks.len() as isize - 1 - p as isize
    }
}

/// One hint per line of a dimension: all rows, or all columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintSet {
    hints: Vec<Hint>,
}

impl HintSet {
    pub fn new(hints: Vec<Hint>) -> Self {
        Self { hints }
    }

    /// Number of lines in this dimension.
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hint> {
        self.hints.iter()
    }
}

impl Index<usize> for HintSet {
    type Output = Hint;

    fn index(&self, i: usize) -> &Hint {
        &self.hints[i]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn occupation_counts_blocks_and_gaps() {
        let hint = Hint::new(vec![3, 1, 2]);
        // 3 + 1 + 2 filled cells plus two separating gaps.
        assert_eq!(hint.occupation(0), 8);
        // Suffix [1, 2]: 3 cells plus one gap.
        assert_eq!(hint.occupation(1), 4);
        assert_eq!(hint.occupation(2), 2);
    }

    #[test]
    fn occupation_of_empty_suffix_is_minus_one() {
        let hint = Hint::new(vec![2, 2]);
        assert_eq!(hint.occupation(2), -1);

        let empty = Hint::new(vec![]);
        assert_eq!(empty.occupation(0), -1);
    }

    #[test]
    fn hint_set_indexes_lines() {
        let set = HintSet::new(vec![Hint::new(vec![1]), Hint::new(vec![2, 1])]);
        assert_eq!(set.len(), 2);
        assert_eq!(set[1].blocks(), &[2, 1]);
    }
}
