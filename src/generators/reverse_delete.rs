use std::collections::VecDeque;

use crate::{
    error::Result,
    generators::EdgePriorities,
    grid::{Cell, CellState, Maze},
};

/// Reverse-delete: start from the full grid graph and drop edges by
/// decreasing priority, unless dropping one would disconnect its endpoints.
pub fn reverse_delete(maze: &mut Maze, priorities: &EdgePriorities) -> Result<()> {
    priorities.check_size(maze.size())?;
    let cells = maze.vertex_count();
    maze.fill();

    let mut kept = 0;
    for edge in priorities.ascending().iter().rev() {
        if maze.edge_count() + 1 == cells {
            break;
        }
        maze.remove_edge(edge.a, edge.b)?;
        if !has_path(maze, edge.a, edge.b)? {
            maze.add_edge(edge.a, edge.b)?;
            maze.set(edge.a, CellState::Completed)?;
            maze.set(edge.b, CellState::Completed)?;
            kept += 1;
        }
    }

    for cell in 0..cells {
        maze.set(cell, CellState::Completed)?;
    }
    tracing::debug!(
        "[reverse-delete] kept {} bridges, stopped with {} edges",
        kept,
        maze.edge_count()
    );
    Ok(())
}

/// Breadth-first search over passages that stops as soon as `to` is reached.
fn has_path(maze: &Maze, from: Cell, to: Cell) -> Result<bool> {
    let mut seen = vec![false; maze.vertex_count()];
    let mut queue = VecDeque::from([from]);
    seen[from] = true;

    while let Some(cell) = queue.pop_front() {
        if cell == to {
            return Ok(true);
        }
        for next in maze.passages(cell)? {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    Ok(false)
}
