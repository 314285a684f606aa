use crate::puzzle::{Direction, Puzzle};

/// Every grid one slide away from `puzzle`, paired with the label of the tile
/// that moved. Emitted left, right, up, down relative to the blank; each entry
/// is a fresh grid.
pub fn neighbors(puzzle: &Puzzle) -> Vec<(u32, Puzzle)> {
    let mut out = Vec::with_capacity(Direction::ALL.len());
    for dir in Direction::ALL {
        if let Some(next) = puzzle.step(dir) {
            out.push(next);
        }
    }
    out
}
