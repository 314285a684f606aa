//! Error types for loading grids, replaying moves and running searches.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a grid description is rejected before it reaches a search.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is empty")]
    Empty,

    #[error("grid size {0:?} is not a positive integer")]
    BadSize(String),

    #[error("invalid input, label {value:?} in row {row} is not an integer")]
    BadLabel { row: usize, value: String },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("incorrect labels or missing gap: labels must be exactly 0..={max}")]
    Labels { max: usize },
}

/// Failures while replaying a move sequence against a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("move {0:?} is not a tile label")]
    BadLabel(String),

    #[error("tile {label} is not next to the blank (step {step})")]
    IllegalMove { label: u32, step: usize },
}

/// Errors raised by a search run. Exhausting the frontier is not one of them;
/// that is reported as [`crate::search::Outcome::Unsolvable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("state has no entry in the parent map")]
    MissingParent,

    #[error("parent map contains a cycle")]
    ParentCycle,

    #[error("expansion budget of {limit} states exhausted")]
    BudgetExhausted { limit: usize },
}
