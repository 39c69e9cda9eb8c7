use rand::{Rng, seq::IndexedRandom, seq::SliceRandom};

use crate::{
    error::Result,
    grid::{Cell, CellState, Dir, Maze},
};

/// Randomized depth-first search with an explicit stack.
pub fn iterative_dfs(maze: &mut Maze, start: Cell, rng: &mut impl Rng) -> Result<()> {
    maze.set(start, CellState::Visited)?;

    // The stack keeps only cells that are already part of the maze
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        let neighbors = maze
            .neighbors(cell)?
            .filter(|&c| maze[c].is_unvisited())
            .collect::<Vec<_>>();

        if let Some(&neighbor) = neighbors.choose(rng) {
            maze.add_edge(cell, neighbor)?;
            maze.set(neighbor, CellState::Visited)?;
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(neighbor);
        } else {
            maze.set(cell, CellState::Completed)?;
        }
    }
    Ok(())
}

/// Randomized depth-first search in recursive order: every cell tries its
/// directions in a shuffled order and finishes all of them before its caller
/// moves on.
///
/// The descent runs on an explicit stack of frames, so the depth of the maze
/// is not limited by the thread's stack.
pub fn recursive_dfs(maze: &mut Maze, start: Cell, rng: &mut impl Rng) -> Result<()> {
    let size = maze.size();
    maze.set(start, CellState::Visited)?;
    let mut stack = vec![Frame::new(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let cell = frame.cell;
        let Some(&dir) = frame.dirs.get(frame.next) else {
            // All directions tried, return to the caller
            stack.pop();
            maze.set(cell, CellState::Completed)?;
            continue;
        };
        frame.next += 1;

        if let Some(next) = size.neighbor(cell, dir) {
            if maze[next].is_unvisited() {
                maze.add_edge(cell, next)?;
                maze.set(next, CellState::Visited)?;
                stack.push(Frame::new(next, rng));
            }
        }
    }
    Ok(())
}

/// One level of the depth-first descent.
struct Frame {
    cell: Cell,
    dirs: [Dir; 4],
    /// Index of the next direction to try.
    next: usize,
}

impl Frame {
    fn new(cell: Cell, rng: &mut impl Rng) -> Self {
        let mut dirs = Dir::ALL;
        dirs.shuffle(rng);
        Frame {
            cell,
            dirs,
            next: 0,
        }
    }
}
