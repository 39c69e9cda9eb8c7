use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{
    error::Result,
    generators::EdgePriorities,
    grid::{Cell, CellState, Edge, Maze},
};

/// Prim's algorithm: grow one tree from `start`, always taking the
/// lowest-priority edge that leaves it.
///
/// Cells next to the tree are marked [`CellState::Frontier`]; heap entries
/// whose target has joined the tree in the meantime are dropped when popped.
pub fn prim(maze: &mut Maze, start: Cell, priorities: &EdgePriorities) -> Result<()> {
    priorities.check_size(maze.size())?;
    let size = maze.size();
    let mut heap = BinaryHeap::new();

    maze.set(start, CellState::Completed)?;
    push_frontier(maze, start, priorities, &mut heap)?;

    while let Some(Reverse((_, from, to))) = heap.pop() {
        if maze[to] == CellState::Completed {
            continue;
        }
        maze.add_edge(from, to)?;
        maze.set(to, CellState::Completed)?;
        push_frontier(maze, to, priorities, &mut heap)?;

        if maze.edge_count() + 1 == size.cells() {
            break;
        }
    }

    tracing::debug!("[prim] {} stale frontier entries left", heap.len());
    Ok(())
}

/// Queues every edge from `cell` to a cell outside the tree.
fn push_frontier(
    maze: &mut Maze,
    cell: Cell,
    priorities: &EdgePriorities,
    heap: &mut BinaryHeap<Reverse<(u32, Cell, Cell)>>,
) -> Result<()> {
    for neighbor in maze.neighbors(cell)? {
        if maze[neighbor] == CellState::Completed {
            continue;
        }
        let priority = priorities.priority(Edge::new(cell, neighbor));
        heap.push(Reverse((priority, cell, neighbor)));
        maze.set(neighbor, CellState::Frontier)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridGraph, GridSize};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_prim_spanning_tree() {
        for (cols, rows) in [(1, 1), (1, 5), (5, 1), (4, 6), (9, 9)] {
            let mut maze = GridGraph::new(cols, rows, CellState::Unvisited);
            let priorities =
                EdgePriorities::random(GridSize::new(cols, rows), &mut StdRng::seed_from_u64(11));
            prim(&mut maze, 0, &priorities).unwrap();
            assert!(maze.is_spanning_tree(), "{}x{}", cols, rows);
            assert!((0..maze.vertex_count()).all(|c| maze[c] == CellState::Completed));
        }
    }

    #[test]
    fn test_prim_start_does_not_matter() {
        let size = GridSize::new(6, 5);
        let priorities = EdgePriorities::random(size, &mut StdRng::seed_from_u64(5));
        let mut first = GridGraph::new(6, 5, CellState::Unvisited);
        let mut second = GridGraph::new(6, 5, CellState::Unvisited);
        prim(&mut first, 0, &priorities).unwrap();
        prim(&mut second, 17, &priorities).unwrap();
        assert_eq!(
            first.edges().collect::<Vec<_>>(),
            second.edges().collect::<Vec<_>>()
        );
    }
}
