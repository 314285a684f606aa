//! Uninformed searches over the sliding-tile state graph.
//!
//! Three strategies share one bookkeeping shape, a [`SearchTree`] holding a
//! frontier, the discovered set and the parent map:
//! - [`Strategy::Bfs`] expands the frontier first-in first-out and returns a
//!   shortest path.
//! - [`Strategy::Dfs`] pushes new grids to the front and returns whichever path
//!   it stumbles on first.
//! - [`Strategy::Bds`] grows one tree from the start and one from the goal,
//!   alternating a single expansion on each side, and stops as soon as the
//!   trees touch.
//!
//! A grid is claimed by the first expansion that discovers it and is never
//! re-parented. Running out of frontier yields [`Outcome::Unsolvable`].

use std::collections::{HashSet, VecDeque};
use std::fmt;

use tracing::{debug, info};

use crate::error::SearchError;
use crate::goal::GoalCache;
use crate::neighbors::neighbors;
use crate::path::{find_parent_path, stitch, ParentMap};
use crate::puzzle::Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Bds,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dfs, Strategy::Bds];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Bds => "BDS",
        };
        write!(f, "{}", s)
    }
}

/// Limits applied to every search a [`Solver`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop with [`SearchError::BudgetExhausted`] after this many expansions.
    /// `None` searches until the frontier is empty.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Grids popped from a frontier.
    pub expanded: usize,
    /// Grids ever added to a discovered set, roots included.
    pub discovered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Moves from start to goal, each the label of the tile slid into the blank.
    Solved(Vec<String>),
    Unsolvable,
}

impl Outcome {
    pub fn moves(&self) -> Option<&[String]> {
        match self {
            Outcome::Solved(moves) => Some(moves),
            Outcome::Unsolvable => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub outcome: Outcome,
    pub stats: SearchStats,
}

/// How new grids enter a frontier.
#[derive(Debug, Clone, Copy)]
enum Discipline {
    Fifo,
    Lifo,
}

/// Frontier, discovered set and parent map for one search direction.
struct SearchTree {
    frontier: VecDeque<Puzzle>,
    discovered: HashSet<Puzzle>,
    parents: ParentMap,
    discipline: Discipline,
}

impl SearchTree {
    fn rooted(root: Puzzle, discipline: Discipline) -> Self {
        let mut discovered = HashSet::new();
        discovered.insert(root.clone());
        let mut parents = ParentMap::new();
        parents.insert(root.clone(), None);

        Self {
            frontier: VecDeque::from([root]),
            discovered,
            parents,
            discipline,
        }
    }

    /// Records `next` as reached from `from` by sliding `moved`. Returns false
    /// if it was already discovered.
    fn discover(&mut self, moved: u32, next: Puzzle, from: &Puzzle) -> bool {
        if self.discovered.contains(&next) {
            return false;
        }
        self.discovered.insert(next.clone());
        self.parents
            .insert(next.clone(), Some((moved, from.clone())));
        match self.discipline {
            Discipline::Fifo => self.frontier.push_back(next),
            Discipline::Lifo => self.frontier.push_front(next),
        }
        true
    }
}

/// Runs searches against a shared goal cache and configuration.
#[derive(Debug, Default)]
pub struct Solver {
    goals: GoalCache,
    config: SearchConfig,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            goals: GoalCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn run(&mut self, strategy: Strategy, start: &Puzzle) -> Result<SearchReport, SearchError> {
        info!(%strategy, size = start.size(), "starting search");

        let report = match strategy {
            Strategy::Bfs => self.single_direction(start, Strategy::Bfs, Discipline::Fifo),
            Strategy::Dfs => self.single_direction(start, Strategy::Dfs, Discipline::Lifo),
            Strategy::Bds => self.bidirectional(start),
        }?;

        match &report.outcome {
            Outcome::Solved(moves) => info!(
                %strategy,
                moves = moves.len(),
                expanded = report.stats.expanded,
                discovered = report.stats.discovered,
                "solution found"
            ),
            Outcome::Unsolvable => info!(
                %strategy,
                expanded = report.stats.expanded,
                discovered = report.stats.discovered,
                "frontier exhausted, unsolvable"
            ),
        }
        Ok(report)
    }

    pub fn bfs(&mut self, start: &Puzzle) -> Result<SearchReport, SearchError> {
        self.run(Strategy::Bfs, start)
    }

    pub fn dfs(&mut self, start: &Puzzle) -> Result<SearchReport, SearchError> {
        self.run(Strategy::Dfs, start)
    }

    pub fn bds(&mut self, start: &Puzzle) -> Result<SearchReport, SearchError> {
        self.run(Strategy::Bds, start)
    }

    /// Runs every strategy on the same start grid, in [`Strategy::ALL`] order.
    pub fn solve_all(&mut self, start: &Puzzle) -> Result<Vec<SearchReport>, SearchError> {
        Strategy::ALL
            .iter()
            .map(|&strategy| self.run(strategy, start))
            .collect()
    }

    fn charge(&self, stats: &mut SearchStats) -> Result<(), SearchError> {
        if let Some(limit) = self.config.max_expansions {
            if stats.expanded >= limit {
                return Err(SearchError::BudgetExhausted { limit });
            }
        }
        stats.expanded += 1;
        Ok(())
    }

    fn single_direction(
        &mut self,
        start: &Puzzle,
        strategy: Strategy,
        discipline: Discipline,
    ) -> Result<SearchReport, SearchError> {
        let goal = self.goals.goal(start.size());
        let mut tree = SearchTree::rooted(start.clone(), discipline);
        let mut stats = SearchStats {
            expanded: 0,
            discovered: 1,
        };

        while let Some(current) = tree.frontier.pop_front() {
            self.charge(&mut stats)?;

            if current == *goal {
                let moves = find_parent_path(&current, &tree.parents)?;
                return Ok(SearchReport {
                    strategy,
                    outcome: Outcome::Solved(moves),
                    stats,
                });
            }

            for (moved, next) in neighbors(&current) {
                if tree.discover(moved, next, &current) {
                    stats.discovered += 1;
                }
            }
        }

        Ok(SearchReport {
            strategy,
            outcome: Outcome::Unsolvable,
            stats,
        })
    }

    fn bidirectional(&mut self, start: &Puzzle) -> Result<SearchReport, SearchError> {
        let goal = self.goals.goal(start.size());
        let mut forward = SearchTree::rooted(start.clone(), Discipline::Fifo);
        let mut backward = SearchTree::rooted((*goal).clone(), Discipline::Fifo);
        let mut stats = SearchStats {
            expanded: 0,
            discovered: 2,
        };

        while !forward.frontier.is_empty() && !backward.frontier.is_empty() {
            let meeting = match self.half_step(&mut forward, &backward, &mut stats)? {
                Some(meeting) => Some(meeting),
                None => self.half_step(&mut backward, &forward, &mut stats)?,
            };

            if let Some(meeting) = meeting {
                debug!(
                    forward = forward.discovered.len(),
                    backward = backward.discovered.len(),
                    "search trees met"
                );
                let moves = stitch(&meeting, &forward.parents, &backward.parents)?;
                return Ok(SearchReport {
                    strategy: Strategy::Bds,
                    outcome: Outcome::Solved(moves),
                    stats,
                });
            }
        }

        Ok(SearchReport {
            strategy: Strategy::Bds,
            outcome: Outcome::Unsolvable,
            stats,
        })
    }

    /// Pops and expands one grid from `own`. Returns the first grid found to
    /// be in `other`'s discovered set, checking the popped grid and then each
    /// newly discovered neighbor.
    fn half_step(
        &self,
        own: &mut SearchTree,
        other: &SearchTree,
        stats: &mut SearchStats,
    ) -> Result<Option<Puzzle>, SearchError> {
        let Some(current) = own.frontier.pop_front() else {
            return Ok(None);
        };
        self.charge(stats)?;

        if other.discovered.contains(&current) {
            return Ok(Some(current));
        }

        for (moved, next) in neighbors(&current) {
            let meets = other.discovered.contains(&next).then(|| next.clone());
            if own.discover(moved, next, &current) {
                stats.discovered += 1;
                if meets.is_some() {
                    return Ok(meets);
                }
            }
        }
        Ok(None)
    }
}
