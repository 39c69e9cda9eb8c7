use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{Rng, seq::IndexedRandom};

use crate::{
    error::{MazeError, Result},
    grid::{Cell, CellState, Maze},
};

/// Which frontier cell the growing tree expands next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthPolicy {
    /// The newest cell: a depth-first carver.
    Last,
    /// A uniformly random cell, which gives Prim-like mazes.
    Random,
    /// A fair coin decides between the newest and a random cell.
    LastOrRandom,
    /// The oldest cell: a breadth-first carver.
    First,
}

impl GrowthPolicy {
    pub const ALL: [GrowthPolicy; 4] = [
        GrowthPolicy::Last,
        GrowthPolicy::Random,
        GrowthPolicy::LastOrRandom,
        GrowthPolicy::First,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GrowthPolicy::Last => "last",
            GrowthPolicy::Random => "random",
            GrowthPolicy::LastOrRandom => "last-or-random",
            GrowthPolicy::First => "first",
        }
    }

    fn select(self, len: usize, rng: &mut impl Rng) -> usize {
        match self {
            GrowthPolicy::Last => len - 1,
            GrowthPolicy::Random => rng.random_range(0..len),
            GrowthPolicy::LastOrRandom => {
                if rng.random_bool(0.5) {
                    len - 1
                } else {
                    rng.random_range(0..len)
                }
            }
            GrowthPolicy::First => 0,
        }
    }
}

impl fmt::Display for GrowthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrowthPolicy {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        GrowthPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| MazeError::UnknownGenerator(s.to_string()))
    }
}

/// The growing tree algorithm: keep a frontier of cells, take one according
/// to `policy` and carve to a random unvisited neighbour of it. Cells with no
/// such neighbour leave the frontier.
///
/// Frontier cells are [`CellState::Visited`] and become
/// [`CellState::Completed`] when they are dropped.
pub fn growing_tree(
    maze: &mut Maze,
    start: Cell,
    policy: GrowthPolicy,
    rng: &mut impl Rng,
) -> Result<()> {
    let mut frontier = VecDeque::from([start]);
    let mut max_frontier = 1;
    maze.set(start, CellState::Visited)?;

    while !frontier.is_empty() {
        let index = policy.select(frontier.len(), rng);
        let cell = frontier[index];

        let unvisited = maze
            .neighbors(cell)?
            .filter(|&n| maze[n].is_unvisited())
            .collect::<Vec<_>>();

        match unvisited.choose(rng) {
            Some(&next) => {
                maze.add_edge(cell, next)?;
                maze.set(next, CellState::Visited)?;
                frontier.push_back(next);
                max_frontier = max_frontier.max(frontier.len());
            }
            None => {
                frontier.remove(index);
                maze.set(cell, CellState::Completed)?;
            }
        }
    }

    tracing::debug!(
        "[growing-tree] policy {}, largest frontier {}",
        policy,
        max_frontier
    );
    Ok(())
}
