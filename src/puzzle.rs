use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::{LoadError, PuzzleError};

/// Direction from the blank towards the tile that slides into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Neighbor emission order. Changing it changes which path DFS and
    /// bidirectional search return.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}

/// An N×N sliding-tile grid. `0` is the blank.
///
/// Values are immutable: every move produces a new `Puzzle`, so a grid stored
/// in a set or map is never changed behind its key. Equality and hashing are
/// by content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Puzzle {
    /// Builds a grid from rows, checking the shape and that the labels are a
    /// permutation of `0..size*size`.
    pub fn from_rows(size: usize, rows: Vec<Vec<u32>>) -> Result<Self, LoadError> {
        if size == 0 {
            return Err(LoadError::BadSize(size.to_string()));
        }
        if rows.len() != size {
            return Err(LoadError::RowCount {
                expected: size,
                found: rows.len(),
            });
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(LoadError::ColumnCount {
                    row: row + 1,
                    expected: size,
                    found: cells.len(),
                });
            }
        }

        let tiles: Vec<u32> = rows.into_iter().flatten().collect();
        let mut sorted = tiles.clone();
        sorted.sort_unstable();
        if !sorted.iter().enumerate().all(|(i, &v)| v as usize == i) {
            return Err(LoadError::Labels {
                max: size * size - 1,
            });
        }

        Ok(Self::from_tiles(size, tiles))
    }

    /// Caller guarantees `tiles` is a valid permutation of length `size * size`.
    fn from_tiles(size: usize, tiles: Vec<u32>) -> Self {
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or(0);
        Self { size, tiles, blank }
    }

    /// The solved grid: labels ascend in row-major order, blank last.
    ///
    /// `size` must be at least 1.
    pub fn goal(size: usize) -> Self {
        debug_assert!(size > 0, "grid size must be positive");
        let cells = size * size;
        let tiles = (1..cells as u32).chain(std::iter::once(0)).collect();
        Self::from_tiles(size, tiles)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.tiles.chunks(self.size)
    }

    /// Label at `(row, col)`, or `None` outside the grid.
    pub fn tile(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.tiles.get(row * self.size + col).copied()
    }

    /// Row and column of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &t)| if i == last { t == 0 } else { t as usize == i + 1 })
    }

    /// Slides the tile in `dir` from the blank into it. Returns the label that
    /// moved and the new grid, or `None` at the edge of the board.
    pub fn step(&self, dir: Direction) -> Option<(u32, Self)> {
        let (row, col) = self.blank();
        let (dr, dc) = dir.as_offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let size = self.size as isize;

        if new_row >= 0 && new_row < size && new_col >= 0 && new_col < size {
            let from = new_row as usize * self.size + new_col as usize;
            let label = self.tiles[from];

            let mut tiles = self.tiles.clone();
            tiles.swap(self.blank, from);

            Some((
                label,
                Self {
                    size: self.size,
                    tiles,
                    blank: from,
                },
            ))
        } else {
            None
        }
    }

    /// Slides the tile labelled `label` into the blank, if it is adjacent.
    pub fn slide(&self, label: u32) -> Option<Self> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.step(dir))
            .find(|&(moved, _)| moved == label)
            .map(|(_, next)| next)
    }

    /// Replays a textual move sequence, one label per step.
    pub fn apply_moves<S: AsRef<str>>(&self, moves: &[S]) -> Result<Self, PuzzleError> {
        let mut current = self.clone();
        for (step, mv) in moves.iter().enumerate() {
            let text = mv.as_ref();
            let label: u32 = text
                .trim()
                .parse()
                .map_err(|_| PuzzleError::BadLabel(text.to_string()))?;
            current = current
                .slide(label)
                .ok_or(PuzzleError::IllegalMove { label, step })?;
        }
        Ok(current)
    }

    /// Parity test for reachability of the goal. Odd widths need an even
    /// number of inversions; even widths need inversions plus the blank's row
    /// to be odd.
    pub fn is_solvable(&self) -> bool {
        let inversions = count_inversions(&self.tiles);

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank().0) % 2 == 1
        }
    }

    /// A uniformly random grid that can reach the goal.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut tiles = Self::goal(size).tiles;

        loop {
            tiles.shuffle(rng);
            let candidate = Self::from_tiles(size, tiles.clone());
            if candidate.is_solvable() {
                return candidate;
            }
        }
    }

    /// Walks `steps` random legal slides away from the goal.
    pub fn scrambled<R: Rng + ?Sized>(size: usize, steps: usize, rng: &mut R) -> Self {
        let mut current = Self::goal(size);
        for _ in 0..steps {
            let options: Vec<Self> = Direction::ALL
                .iter()
                .filter_map(|&dir| current.step(dir))
                .map(|(_, next)| next)
                .collect();
            if let Some(next) = options.choose(rng) {
                current = next.clone();
            }
        }
        current
    }
}

fn count_inversions(tiles: &[u32]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for row in self.rows() {
            for &val in row {
                write!(f, "{:>width$} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn grid(rows: &[&[u32]]) -> Puzzle {
        let size = rows.len();
        Puzzle::from_rows(size, rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn goal_is_ascending_with_trailing_blank() {
        for size in 1..=5 {
            let goal = Puzzle::goal(size);
            assert_eq!(goal, Puzzle::goal(size));
            assert_eq!(goal.tile(size - 1, size - 1), Some(0));
            assert_eq!(goal.blank(), (size - 1, size - 1));
            assert!(goal.is_goal());
            let labels: Vec<u32> = goal.tiles()[..size * size - 1].to_vec();
            let expected: Vec<u32> = (1..(size * size) as u32).collect();
            assert_eq!(labels, expected);
        }
        assert_eq!(Puzzle::goal(2), grid(&[&[1, 2], &[3, 0]]));
    }

    #[test]
    fn from_rows_rejects_bad_shapes_and_labels() {
        assert!(matches!(
            Puzzle::from_rows(2, vec![vec![1, 2]]),
            Err(LoadError::RowCount {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            Puzzle::from_rows(2, vec![vec![1, 2], vec![3]]),
            Err(LoadError::ColumnCount { row: 2, .. })
        ));
        assert!(matches!(
            Puzzle::from_rows(2, vec![vec![1, 2], vec![2, 0]]),
            Err(LoadError::Labels { max: 3 })
        ));
        assert!(matches!(
            Puzzle::from_rows(2, vec![vec![1, 2], vec![3, 4]]),
            Err(LoadError::Labels { .. })
        ));
        assert!(Puzzle::from_rows(0, vec![]).is_err());
    }

    #[test]
    fn equal_content_means_equal_state() {
        let a = grid(&[&[1, 0], &[3, 2]]);
        let b = Puzzle::goal(2).slide(2).unwrap();
        assert_eq!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn step_reports_moved_label() {
        let puzzle = grid(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        let (label, next) = puzzle.step(Direction::Down).unwrap();
        assert_eq!(label, 5);
        assert_eq!(next, grid(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]));
        assert_eq!(next.blank(), (2, 1));
        // Input is untouched.
        assert_eq!(puzzle.blank(), (1, 1));

        assert_eq!(next.slide(5), Some(puzzle.clone()));

        assert!(Puzzle::goal(3).step(Direction::Right).is_none());
        assert!(Puzzle::goal(3).step(Direction::Down).is_none());
    }

    #[test]
    fn tile_lookup_is_bounds_checked() {
        let goal = Puzzle::goal(3);
        assert_eq!(goal.tile(0, 0), Some(1));
        assert_eq!(goal.tile(1, 2), Some(6));
        assert_eq!(goal.tile(0, 3), None);
        assert_eq!(goal.tile(3, 0), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "grid size must be positive")]
    fn goal_of_size_zero_is_rejected() {
        let _ = Puzzle::goal(0);
    }

    #[test]
    fn slide_requires_adjacency() {
        let goal = Puzzle::goal(3);
        assert!(goal.slide(8).is_some());
        assert!(goal.slide(6).is_some());
        assert!(goal.slide(1).is_none());
        assert!(goal.slide(42).is_none());
    }

    #[test]
    fn apply_moves_replays_labels() {
        let start = grid(&[&[3, 1], &[2, 0]]);
        let end = start.apply_moves(&["2", "3", "1", "2"]).unwrap();
        assert!(end.is_goal());

        assert_eq!(
            start.apply_moves(&["x"]),
            Err(PuzzleError::BadLabel("x".to_string()))
        );
        assert_eq!(
            start.apply_moves(&["2", "2", "3"]),
            Err(PuzzleError::IllegalMove { label: 3, step: 2 })
        );
    }

    #[test]
    fn parity_matches_known_instances() {
        assert!(Puzzle::goal(3).is_solvable());
        assert!(Puzzle::goal(4).is_solvable());
        assert!(grid(&[&[1, 0], &[3, 2]]).is_solvable());
        assert!(!grid(&[&[0, 1], &[2, 3]]).is_solvable());
        assert!(!grid(&[&[1, 2, 3], &[4, 5, 6], &[8, 7, 0]]).is_solvable());
        assert!(grid(&[&[8, 6, 7], &[2, 5, 4], &[3, 0, 1]]).is_solvable());
    }

    #[test]
    fn random_grids_are_valid_and_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 2..=4 {
            for _ in 0..20 {
                let shuffled = Puzzle::shuffled(size, &mut rng);
                assert!(shuffled.is_solvable());
                let rows = shuffled.rows().map(|r| r.to_vec()).collect();
                assert_eq!(Puzzle::from_rows(size, rows).unwrap(), shuffled);

                let scrambled = Puzzle::scrambled(size, 15, &mut rng);
                assert!(scrambled.is_solvable());
            }
        }
    }

    #[test]
    fn display_pads_to_widest_label() {
        assert_eq!(Puzzle::goal(2).to_string(), "1 2 \n3 0 \n");
        let text = Puzzle::goal(4).to_string();
        assert!(text.starts_with(" 1  2  3  4 \n"));
        assert!(text.ends_with("13 14 15  0 \n"));
    }
}
