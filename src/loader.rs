//! Reading grids from the tab-delimited text format.
//!
//! ```text
//! 3
//! 1	2	3
//! 4	*	6
//! 7	5	8
//! ```
//!
//! The first field of the first line is the size. Each following line is one
//! row of tab-separated labels, with `*` marking the blank.

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::puzzle::Puzzle;

const BLANK_MARKER: &str = "*";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Puzzle, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grid(&text)
}

pub fn parse_grid(text: &str) -> Result<Puzzle, LoadError> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let (header, body) = lines.split_first().ok_or(LoadError::Empty)?;
    let size_field = header.split('\t').next().unwrap_or_default().trim();
    let size: usize = size_field
        .parse()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| LoadError::BadSize(size_field.to_string()))?;

    let rows = body
        .iter()
        .enumerate()
        .map(|(row, line)| parse_row(row + 1, line))
        .collect::<Result<Vec<_>, _>>()?;

    Puzzle::from_rows(size, rows)
}

fn parse_row(row: usize, line: &str) -> Result<Vec<u32>, LoadError> {
    line.split('\t')
        .map(|field| {
            let field = field.trim();
            if field == BLANK_MARKER {
                return Ok(0);
            }
            field.parse().map_err(|_| LoadError::BadLabel {
                row,
                value: field.to_string(),
            })
        })
        .collect()
}
