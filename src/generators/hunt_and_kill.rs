use std::{fmt, str::FromStr};

use rand::{Rng, seq::IndexedRandom, seq::SliceRandom};

use crate::{
    error::{MazeError, Result},
    grid::{Cell, CellState, Maze},
};

/// How hunt-and-kill looks for the next walk start once a walk is stuck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HuntMode {
    /// Row by row from the top-left corner.
    Scan,
    /// In a random order fixed at the start.
    Random,
}

impl HuntMode {
    pub const ALL: [HuntMode; 2] = [HuntMode::Scan, HuntMode::Random];

    pub fn name(self) -> &'static str {
        match self {
            HuntMode::Scan => "scan",
            HuntMode::Random => "random",
        }
    }
}

impl fmt::Display for HuntMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HuntMode {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        HuntMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| MazeError::UnknownGenerator(s.to_string()))
    }
}

/// Hunt-and-kill: walk randomly into unvisited cells until stuck, then hunt
/// for an unvisited cell next to the maze, connect it and walk on from there.
pub fn hunt_and_kill(
    maze: &mut Maze,
    start: Cell,
    mode: HuntMode,
    rng: &mut impl Rng,
) -> Result<()> {
    let mut targets = (0..maze.vertex_count()).collect::<Vec<_>>();
    if mode == HuntMode::Random {
        targets.shuffle(rng);
    }
    // Cells before `cursor` in `targets` are known to be visited
    let mut cursor = 0;
    let mut hunts = 0;

    let mut current = Some(start);
    maze.set(start, CellState::Completed)?;

    while let Some(cell) = current {
        // Kill
        let unvisited = maze
            .neighbors(cell)?
            .filter(|&n| maze[n].is_unvisited())
            .collect::<Vec<_>>();
        if let Some(&next) = unvisited.choose(rng) {
            maze.add_edge(cell, next)?;
            maze.set(next, CellState::Completed)?;
            current = Some(next);
            continue;
        }

        // Hunt
        while cursor < targets.len() && !maze[targets[cursor]].is_unvisited() {
            cursor += 1;
        }
        current = hunt_from(maze, &targets[cursor..], rng)?;
        if current.is_some() {
            hunts += 1;
        }
    }

    tracing::debug!("[hunt-and-kill] {} mode, {} hunts", mode, hunts);
    Ok(())
}

/// Full pass over `targets` for the first unvisited cell next to the maze,
/// which it connects to the maze.
fn hunt_from(maze: &mut Maze, targets: &[Cell], rng: &mut impl Rng) -> Result<Option<Cell>> {
    for &candidate in targets {
        if !maze[candidate].is_unvisited() {
            continue;
        }
        let visited = maze
            .neighbors(candidate)?
            .filter(|&n| maze[n] == CellState::Completed)
            .collect::<Vec<_>>();
        if let Some(&anchor) = visited.choose(rng) {
            maze.add_edge(anchor, candidate)?;
            maze.set(candidate, CellState::Completed)?;
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}
