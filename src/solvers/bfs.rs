use std::collections::VecDeque;

use crate::error::{MazeError, Result};
use crate::grid::{Cell, CellState, GridGraph};

/// Breadth-first search over the passages of a grid from one source cell.
#[derive(Debug, Clone)]
pub struct Bfs {
    source: Cell,
    distance: Vec<Option<usize>>,
    parent: Vec<Option<Cell>>,
    /// Cells in the order they were dequeued.
    order: Vec<Cell>,
}

impl Bfs {
    pub fn new<T: Clone + PartialEq>(grid: &GridGraph<T>, source: Cell) -> Result<Self> {
        let source = grid.size().check(source)?;
        let cells = grid.vertex_count();
        let mut distance = vec![None; cells];
        let mut parent = vec![None; cells];
        let mut order = Vec::with_capacity(cells);

        let mut queue = VecDeque::from([source]);
        distance[source] = Some(0);
        while let Some(current) = queue.pop_front() {
            order.push(current);
            let next_distance = distance[current].map(|d| d + 1);
            for neighbor in grid.passages(current)? {
                if distance[neighbor].is_none() {
                    distance[neighbor] = next_distance;
                    parent[neighbor] = Some(current);
                    queue.push_back(neighbor);
                }
            }
        }

        Ok(Bfs {
            source,
            distance,
            parent,
            order,
        })
    }

    pub fn source(&self) -> Cell {
        self.source
    }

    /// Number of passages on the shortest path from the source, `None` when unreachable.
    pub fn distance(&self, cell: Cell) -> Option<usize> {
        self.distance.get(cell).copied().flatten()
    }

    pub fn parent(&self, cell: Cell) -> Option<Cell> {
        self.parent.get(cell).copied().flatten()
    }

    pub fn is_reachable(&self, cell: Cell) -> bool {
        self.distance(cell).is_some()
    }

    /// Cells in visitation order, starting with the source. A flood fill
    /// animation colours them in this order.
    pub fn order(&self) -> &[Cell] {
        &self.order
    }

    pub fn reached_count(&self) -> usize {
        self.order.len()
    }

    pub fn max_distance(&self) -> usize {
        self.farthest()
            .and_then(|cell| self.distance(cell))
            .unwrap_or(0)
    }

    /// A cell with maximal distance from the source.
    pub fn farthest(&self) -> Option<Cell> {
        // The last dequeued cell has the largest distance
        self.order.last().copied()
    }

    /// Shortest path from the source to `target`, both included.
    pub fn path_to(&self, target: Cell) -> Result<Vec<Cell>> {
        if !self.is_reachable(target) {
            return Err(MazeError::Unreachable {
                from: self.source,
                to: target,
            });
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Ok(path)
    }
}

/// Whether every cell is reachable from every other one.
pub fn is_connected<T: Clone + PartialEq>(grid: &GridGraph<T>) -> bool {
    if grid.is_empty() {
        return true;
    }
    Bfs::new(grid, 0).is_ok_and(|bfs| bfs.reached_count() == grid.vertex_count())
}

/// Colours the grid from `source` outwards: every reached cell is marked
/// visited when discovered and completed when expanded, so observers see the
/// search front move through the maze.
pub fn flood_fill(grid: &mut GridGraph<CellState>, source: Cell) -> Result<Bfs> {
    let bfs = Bfs::new(grid, source)?;
    grid.fill_content(CellState::Unvisited);
    grid.set(source, CellState::Visited)?;
    for &cell in bfs.order() {
        grid.set(cell, CellState::Completed)?;
        let discovered = grid
            .passages(cell)?
            .filter(|&n| bfs.parent(n) == Some(cell))
            .collect::<Vec<_>>();
        for neighbor in discovered {
            grid.set(neighbor, CellState::Visited)?;
        }
    }
    tracing::debug!(
        "[flood fill] reached {} cells from {}, max distance {}",
        bfs.reached_count(),
        source,
        bfs.max_distance()
    );
    Ok(bfs)
}
