use rand::{Rng, seq::IteratorRandom};

use crate::{
    error::Result,
    grid::{Cell, CellState, Maze},
};

/// Aldous-Broder: a plain random walk that carves a passage whenever it
/// enters a cell for the first time. Like Wilson's algorithm it samples
/// spanning trees uniformly, but it needs the cover time of the grid.
pub fn aldous_broder(maze: &mut Maze, start: Cell, rng: &mut impl Rng) -> Result<()> {
    let cells = maze.vertex_count();
    let mut current = start;
    let mut steps = 0usize;
    maze.set(current, CellState::Completed)?;

    while maze.edge_count() + 1 < cells {
        let Some(next) = maze.neighbors(current)?.choose(rng) else {
            break;
        };
        if maze[next].is_unvisited() {
            maze.add_edge(current, next)?;
            maze.set(next, CellState::Completed)?;
        }
        current = next;
        steps += 1;
    }

    tracing::debug!("[aldous-broder] covered {} cells in {} steps", cells, steps);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridGraph;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_aldous_broder_spanning_tree() {
        for (cols, rows) in [(1, 1), (1, 7), (7, 1), (6, 6)] {
            let mut maze = GridGraph::new(cols, rows, CellState::Unvisited);
            aldous_broder(&mut maze, 0, &mut StdRng::seed_from_u64(21)).unwrap();
            assert!(maze.is_spanning_tree(), "{}x{}", cols, rows);
        }
    }
}
