use crossterm::style::{style, Stylize};

use crate::puzzle::Puzzle;
use crate::search::{Outcome, SearchReport};

/// Draws `puzzle` one row per line with the blank shown as `*`. With `color`,
/// the blank is dimmed and `highlight` (the tile that just moved) is bold.
pub fn render_grid(puzzle: &Puzzle, highlight: Option<u32>, color: bool) -> String {
    let width = (puzzle.size() * puzzle.size() - 1).to_string().len();
    let mut out = String::new();

    for row in puzzle.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|&val| {
                let text = if val == 0 {
                    format!("{:>width$}", "*")
                } else {
                    format!("{:>width$}", val)
                };
                if !color {
                    text
                } else if val == 0 {
                    style(text).dark_grey().to_string()
                } else if Some(val) == highlight {
                    style(text).yellow().bold().to_string()
                } else {
                    text
                }
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

pub fn render_moves(moves: &[String]) -> String {
    if moves.is_empty() {
        "(already solved)".to_string()
    } else {
        moves.join(" ")
    }
}

/// One-line summary of a finished search.
pub fn render_report(report: &SearchReport) -> String {
    let stats = &report.stats;
    match &report.outcome {
        Outcome::Solved(moves) => format!(
            "{}: {} moves (expanded {}, discovered {})\n  {}",
            report.strategy,
            moves.len(),
            stats.expanded,
            stats.discovered,
            render_moves(moves)
        ),
        Outcome::Unsolvable => format!(
            "{}: unsolvable (expanded {}, discovered {})",
            report.strategy, stats.expanded, stats.discovered
        ),
    }
}
