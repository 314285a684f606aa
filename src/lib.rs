//! Sliding-tile puzzle solver built on uninformed search.
//!
//! A [`Puzzle`] is an immutable N×N grid. [`Solver`] runs breadth-first,
//! depth-first or bidirectional breadth-first search from it towards the goal
//! grid and reports the moves as tile labels.

pub mod error;
pub mod goal;
pub mod loader;
pub mod neighbors;
pub mod path;
pub mod puzzle;
pub mod render;
pub mod search;

pub use error::{LoadError, PuzzleError, SearchError};
pub use goal::GoalCache;
pub use loader::{load_from_file, parse_grid};
pub use puzzle::{Direction, Puzzle};
pub use search::{Outcome, SearchConfig, SearchReport, SearchStats, Solver, Strategy};
