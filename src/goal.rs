//! Per-size cache of solved grids.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::puzzle::Puzzle;

/// Computes the goal grid once per size and hands out shared copies.
///
/// Owned by whoever runs searches (see [`crate::search::Solver`]) rather than
/// living in a global.
#[derive(Debug, Default)]
pub struct GoalCache {
    goals: HashMap<usize, Rc<Puzzle>>,
}

impl GoalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal(&mut self, size: usize) -> Rc<Puzzle> {
        let goal = self.goals.entry(size).or_insert_with(|| {
            debug!(size, "building goal grid");
            Rc::new(Puzzle::goal(size))
        });
        Rc::clone(goal)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
