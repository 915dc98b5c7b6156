//! Puzzle definitions as they arrive from disk.
//!
//! A definition carries the hints plus descriptive metadata; converting it
//! into a [`Board`] is where input errors surface — before any search work
//! begins. Puzzles with more than two colours are rejected outright: this
//! engine only understands filled/empty cells.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};
use crate::solver::board::Board;
use crate::solver::hint::{Hint, HintSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Cell colours, background first. Defaults to white/black.
    #[serde(default = "default_colours")]
    pub colours: Vec<String>,
    /// Row hints, top to bottom.
    pub rows: Vec<Vec<usize>>,
    /// Column hints, left to right.
    pub columns: Vec<Vec<usize>>,
}

fn default_colours() -> Vec<String> {
    vec!["white".to_string(), "black".to_string()]
}

impl PuzzleDefinition {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data)
            .map_err(|e| SolverError::MissingData(e.to_string()).into())
    }

    /// Builds the initial all-`Unknown` board, rejecting puzzles this
    /// engine cannot represent.
    pub fn into_board(self) -> Result<Board> {
        if self.colours.len() > 2 {
            return Err(SolverError::IncompatiblePuzzle {
                colours: self.colours.len(),
            }
            .into());
        }
        let rows = HintSet::new(self.rows.into_iter().map(Hint::new).collect());
        let columns = HintSet::new(self.columns.into_iter().map(Hint::new).collect());
        Ok(Board::new(rows, columns))
    }
}

/// Reads a JSON puzzle definition and builds its board.
pub fn load_board(path: &Path) -> Result<Board> {
    let data = fs::read_to_string(path)
        .map_err(|e| SolverError::MissingData(format!("{}: {e}", path.display())))?;
    PuzzleDefinition::from_json(&data)?.into_board()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_a_minimal_definition() {
        let definition = PuzzleDefinition::from_json(
            r#"{ "title": "dot", "rows": [[1]], "columns": [[1]] }"#,
        )
        .unwrap();
        assert_eq!(definition.title.as_deref(), Some("dot"));
        assert_eq!(definition.colours.len(), 2);

        let board = definition.into_board().unwrap();
        assert_eq!((board.height(), board.width()), (1, 1));
    }

    #[test]
    fn corrupt_data_is_a_missing_data_error() {
        let err = PuzzleDefinition::from_json("{ not json").unwrap_err();
        assert!(matches!(err.inner(), SolverError::MissingData(_)));
    }

    #[test]
    fn multicolour_puzzles_are_rejected() {
        let definition = PuzzleDefinition::from_json(
            r#"{ "colours": ["white", "black", "red"], "rows": [[1]], "columns": [[1]] }"#,
        )
        .unwrap();
        let err = definition.into_board().unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::IncompatiblePuzzle { colours: 3 }
        ));
    }

    #[test]
    fn missing_file_is_a_missing_data_error() {
        let err = load_board(Path::new("/nonexistent/puzzle.json")).unwrap_err();
        assert!(matches!(err.inner(), SolverError::MissingData(_)));
    }
}
