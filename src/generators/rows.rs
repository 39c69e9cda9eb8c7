//! Builders that sweep the grid row by row and never look back.

use std::collections::BTreeMap;

use rand::{Rng, seq::IndexedRandom, seq::SliceRandom};

use crate::{
    error::Result,
    grid::{Cell, CellState, Dir, Maze},
    partition::Partition,
};

/// Binary tree: every cell opens a passage to its northern or its eastern
/// neighbour. The top row and the east column become straight corridors.
pub fn binary_tree(maze: &mut Maze, rng: &mut impl Rng) -> Result<()> {
    let size = maze.size();
    for cell in 0..size.cells() {
        let targets = [Dir::North, Dir::East]
            .into_iter()
            .filter_map(|dir| size.neighbor(cell, dir))
            .collect::<Vec<_>>();
        if let Some(&target) = targets.choose(rng) {
            maze.add_edge(cell, target)?;
        }
        maze.set(cell, CellState::Completed)?;
    }
    Ok(())
}

/// Sidewinder: each row is cut into runs of random length. Cells of a run are
/// joined eastwards and one random cell of the run opens to the north. The
/// top row has nothing above it and becomes a single run.
pub fn sidewinder(maze: &mut Maze, rng: &mut impl Rng) -> Result<()> {
    let size = maze.size();
    let mut run = Vec::new();

    for row in 0..size.rows {
        for col in 0..size.cols {
            let cell = maze.cell(col, row)?;
            run.push(cell);
            maze.set(cell, CellState::Visited)?;

            let at_east_border = col + 1 == size.cols;
            let close_run = at_east_border || (row > 0 && rng.random_bool(0.5));
            if close_run {
                if let Some(&member) = run.choose(rng) {
                    if let Some(north) = size.neighbor(member, Dir::North) {
                        maze.add_edge(member, north)?;
                    }
                }
                for member in run.drain(..) {
                    maze.set(member, CellState::Completed)?;
                }
            } else {
                maze.add_edge(cell, cell + 1)?;
            }
        }
    }
    Ok(())
}

/// Eller's algorithm: one row at a time, join random adjacent cells of
/// different sets, then carry every set at least once into the next row. The
/// last row joins all sets that are still apart.
pub fn eller(maze: &mut Maze, rng: &mut impl Rng) -> Result<()> {
    let size = maze.size();
    let mut partition = Partition::new(size.cells());

    for row in 0..size.rows {
        let last_row = row + 1 == size.rows;
        let cells = (0..size.cols)
            .map(|col| maze.cell(col, row))
            .collect::<Result<Vec<Cell>>>()?;

        // Join adjacent cells of different sets
        for pair in cells.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if !partition.same(left, right) && (last_row || rng.random_bool(0.5)) {
                partition.join(left, right)?;
                maze.add_edge(left, right)?;
            }
        }

        if !last_row {
            // Carry each set down at least once
            let mut sets: BTreeMap<usize, Vec<Cell>> = BTreeMap::new();
            for &cell in &cells {
                sets.entry(partition.find(cell)).or_default().push(cell);
            }
            for members in sets.values_mut() {
                members.shuffle(rng);
                let carried = rng.random_range(1..=members.len());
                for &cell in &members[..carried] {
                    let below = cell + size.cols;
                    partition.join(cell, below)?;
                    maze.add_edge(cell, below)?;
                    maze.set(below, CellState::Visited)?;
                }
            }
        }

        for &cell in &cells {
            maze.set(cell, CellState::Completed)?;
        }
    }

    tracing::debug!("[eller] {} sets left", partition.size());
    Ok(())
}
