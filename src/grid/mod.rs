pub mod cell;
pub mod event;
mod size;

use std::{fmt, sync::mpsc::Sender};

use crate::error::{MazeError, Result};

pub use cell::CellState;
pub use event::{GridEvent, ObserverId};
use event::Observers;
pub use size::{Dir, GridSize};

/// Identity of a grid cell: `row * cols + col`.
pub type Cell = usize;

/// The grid the generators carve: cell content is the visitation state.
pub type Maze = GridGraph<CellState>;

/// An undirected passage between two grid-adjacent cells, normalized so that `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub a: Cell,
    pub b: Cell,
}

impl Edge {
    pub fn new(a: Cell, b: Cell) -> Self {
        if a <= b { Edge { a, b } } else { Edge { a: b, b: a } }
    }

    /// The endpoint that is not `cell`.
    pub fn other(&self, cell: Cell) -> Cell {
        if cell == self.a { self.b } else { self.a }
    }
}

impl From<(Cell, Cell)> for Edge {
    fn from((a, b): (Cell, Cell)) -> Self {
        Edge::new(a, b)
    }
}

/// A `cols x rows` grid graph with 4-neighbour adjacency.
///
/// Every cell carries a content value of type `T`. Edges can only join
/// grid-adjacent cells and are always symmetric, so those invariants hold at
/// every step of a generator even though the spanning-tree property only holds
/// once it has finished.
pub struct GridGraph<T> {
    size: GridSize,
    content: Box<[T]>,
    /// Bit mask of present edges per cell, see [`Dir::bit`].
    links: Box<[u8]>,
    edge_count: usize,
    observers: Observers<T>,
}

impl<T: Clone + PartialEq> GridGraph<T> {
    /// Creates a grid without any edges where every cell holds `default`.
    pub fn new(cols: usize, rows: usize, default: T) -> Self {
        let size = GridSize::new(cols, rows);
        GridGraph {
            size,
            content: vec![default; size.cells()].into_boxed_slice(),
            links: vec![0; size.cells()].into_boxed_slice(),
            edge_count: 0,
            observers: Observers::default(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cols(&self) -> usize {
        self.size.cols
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn vertex_count(&self) -> usize {
        self.size.cells()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn cell(&self, col: usize, row: usize) -> Result<Cell> {
        self.size.cell(col, row)
    }

    pub fn col(&self, cell: Cell) -> Result<usize> {
        self.size.col(cell)
    }

    pub fn row(&self, cell: Cell) -> Result<usize> {
        self.size.row(cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.size.contains(cell)
    }

    pub fn get(&self, cell: Cell) -> Result<&T> {
        let cell = self.size.check(cell)?;
        Ok(&self.content[cell])
    }

    /// Sets the content of a cell. Observers are only notified when the value
    /// actually changes.
    pub fn set(&mut self, cell: Cell, value: T) -> Result<()> {
        let cell = self.size.check(cell)?;
        if self.content[cell] != value {
            let old = std::mem::replace(&mut self.content[cell], value);
            if !self.observers.is_empty() {
                let new = self.content[cell].clone();
                self.observers
                    .notify(&GridEvent::CellChanged { cell, old, new });
            }
        }
        Ok(())
    }

    /// Sets every cell to `value` and emits a single bulk notification.
    pub fn fill_content(&mut self, value: T) {
        self.content.iter_mut().for_each(|c| *c = value.clone());
        self.observers.notify(&GridEvent::GraphChanged);
    }

    /// Grid-adjacent cells of `cell`, whether or not an edge joins them.
    pub fn neighbors(&self, cell: Cell) -> Result<impl Iterator<Item = Cell> + use<T>> {
        let cell = self.size.check(cell)?;
        Ok(self.size.neighbors(cell))
    }

    /// Neighbours of `cell` joined to it by an edge.
    pub fn passages(&self, cell: Cell) -> Result<impl Iterator<Item = Cell> + '_> {
        let cell = self.size.check(cell)?;
        let links = self.links[cell];
        Ok(Dir::ALL
            .into_iter()
            .filter(move |dir| links & dir.bit() != 0)
            .filter_map(move |dir| self.size.neighbor(cell, dir)))
    }

    pub fn degree(&self, cell: Cell) -> Result<usize> {
        let cell = self.size.check(cell)?;
        Ok(self.links[cell].count_ones() as usize)
    }

    /// Checks both cells and returns the direction from `a` to `b`.
    fn adjacency(&self, a: Cell, b: Cell) -> Result<Dir> {
        self.size.check(a)?;
        self.size.check(b)?;
        self.size
            .direction(a, b)
            .ok_or(MazeError::NotAdjacent { a, b })
    }

    pub fn has_edge(&self, a: Cell, b: Cell) -> Result<bool> {
        let dir = self.adjacency(a, b)?;
        Ok(self.links[a] & dir.bit() != 0)
    }

    pub fn add_edge(&mut self, a: Cell, b: Cell) -> Result<()> {
        let dir = self.adjacency(a, b)?;
        if self.links[a] & dir.bit() != 0 {
            return Err(MazeError::EdgeExists { a, b });
        }
        self.links[a] |= dir.bit();
        self.links[b] |= dir.opposite().bit();
        self.edge_count += 1;
        self.observers.notify(&GridEvent::EdgeAdded { a, b });
        Ok(())
    }

    pub fn remove_edge(&mut self, a: Cell, b: Cell) -> Result<()> {
        let dir = self.adjacency(a, b)?;
        if self.links[a] & dir.bit() == 0 {
            return Err(MazeError::MissingEdge { a, b });
        }
        self.links[a] &= !dir.bit();
        self.links[b] &= !dir.opposite().bit();
        self.edge_count -= 1;
        self.observers.notify(&GridEvent::EdgeRemoved { a, b });
        Ok(())
    }

    /// All present edges. Every call starts a fresh pass.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.size.cells()).flat_map(move |cell| {
            [Dir::East, Dir::South]
                .into_iter()
                .filter(move |dir| self.links[cell] & dir.bit() != 0)
                .filter_map(move |dir| self.size.neighbor(cell, dir))
                .map(move |other| Edge::new(cell, other))
        })
    }

    /// Adds every possible edge, turning the grid into the full grid graph.
    pub fn fill(&mut self) {
        for cell in 0..self.size.cells() {
            self.links[cell] = Dir::ALL
                .into_iter()
                .filter(|&dir| self.size.neighbor(cell, dir).is_some())
                .fold(0, |mask, dir| mask | dir.bit());
        }
        self.edge_count = self.size.max_edges();
        self.observers.notify(&GridEvent::GraphChanged);
    }

    /// Removes every edge.
    pub fn clear_edges(&mut self) {
        self.links.iter_mut().for_each(|l| *l = 0);
        self.edge_count = 0;
        self.observers.notify(&GridEvent::GraphChanged);
    }

    /// Whether the edges form a single tree touching every cell.
    pub fn is_spanning_tree(&self) -> bool {
        let cells = self.size.cells();
        if cells == 0 {
            return self.edge_count == 0;
        }
        self.edge_count == cells - 1 && crate::solvers::is_connected(self)
    }

    /// Registers a callback invoked synchronously on every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&GridEvent<T>) + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: Clone + PartialEq + 'static> GridGraph<T> {
    /// Forwards every event into `sender`, e.g. towards a render thread.
    pub fn subscribe_channel(&mut self, sender: Sender<GridEvent<T>>) -> ObserverId {
        self.observers.subscribe_channel(sender)
    }
}

impl<T: Clone + PartialEq> std::ops::Index<Cell> for GridGraph<T> {
    type Output = T;

    /// # Panics
    /// If `cell` is out of range. Use [`GridGraph::get`] for a checked lookup.
    fn index(&self, cell: Cell) -> &Self::Output {
        &self.content[cell]
    }
}

/// Draws the passages as ASCII walls, one `+--+` block per cell.
impl<T> fmt::Display for GridGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let GridSize { cols, rows } = self.size;
        if cols == 0 || rows == 0 {
            return Ok(());
        }
        writeln!(f, "+{}", "--+".repeat(cols))?;
        for row in 0..rows {
            let mut line = String::from("|");
            let mut below = String::from("+");
            for col in 0..cols {
                let links = self.links[self.size.ravel(col, row)];
                line.push_str(if links & Dir::East.bit() != 0 { "   " } else { "  |" });
                below.push_str(if links & Dir::South.bit() != 0 { "  +" } else { "--+" });
            }
            writeln!(f, "{}", line)?;
            writeln!(f, "{}", below)?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for GridGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridGraph")
            .field("cols", &self.size.cols)
            .field("rows", &self.size.rows)
            .field("edges", &self.edge_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_empty_grid() {
        let grid = GridGraph::new(0, 0, CellState::Unvisited);
        assert_eq!(grid.edge_count(), 0);
        assert_eq!(grid.vertex_count(), 0);
        assert_eq!(grid.cols(), 0);
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.edges().count(), 0);
        assert!(matches!(
            grid.cell(0, 0),
            Err(MazeError::CoordOutOfRange { .. })
        ));
        assert!(grid.degree(0).is_err());
        assert!(grid.has_edge(0, 1).is_err());
        assert!(grid.is_spanning_tree());
    }

    #[test]
    fn test_empty_grid_add_edge() {
        let mut grid = GridGraph::new(0, 0, CellState::Unvisited);
        assert!(matches!(
            grid.add_edge(0, 1),
            Err(MazeError::CellOutOfRange { cell: 0, cells: 0 })
        ));
    }

    #[test]
    fn test_add_remove_edge() {
        let mut grid = GridGraph::new(3, 3, 0u8);
        grid.add_edge(4, 5).unwrap();
        assert!(grid.has_edge(5, 4).unwrap());
        assert_eq!(grid.degree(4).unwrap(), 1);
        assert_eq!(grid.degree(5).unwrap(), 1);
        assert_eq!(grid.passages(5).unwrap().collect::<Vec<_>>(), vec![4]);
        assert!(matches!(
            grid.add_edge(5, 4),
            Err(MazeError::EdgeExists { .. })
        ));
        grid.remove_edge(5, 4).unwrap();
        assert_eq!(grid.edge_count(), 0);
        assert!(matches!(
            grid.remove_edge(4, 5),
            Err(MazeError::MissingEdge { .. })
        ));
    }

    #[test]
    fn test_non_adjacent_edge() {
        let mut grid = GridGraph::new(3, 3, 0u8);
        // 2 and 3 are consecutive ids but sit on different rows
        assert!(matches!(
            grid.add_edge(2, 3),
            Err(MazeError::NotAdjacent { a: 2, b: 3 })
        ));
        assert!(matches!(
            grid.add_edge(4, 4),
            Err(MazeError::NotAdjacent { .. })
        ));
        assert!(matches!(
            grid.add_edge(0, 8),
            Err(MazeError::NotAdjacent { .. })
        ));
    }

    #[test]
    fn test_fill_and_edges() {
        let mut grid = GridGraph::new(4, 3, 0u8);
        grid.fill();
        assert_eq!(grid.edge_count(), 17);
        assert_eq!(grid.edges().count(), 17);
        assert_eq!(grid.degree(5).unwrap(), 4);
        assert_eq!(grid.degree(0).unwrap(), 2);
        // The edge stream can be restarted
        assert_eq!(
            grid.edges().collect::<Vec<_>>(),
            grid.size().all_edges().collect::<Vec<_>>()
        );
        grid.clear_edges();
        assert_eq!(grid.edges().count(), 0);
    }

    #[test]
    fn test_observers_in_order() {
        let mut grid = GridGraph::new(2, 2, CellState::Unvisited);
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = {
            let log = log.clone();
            grid.subscribe(move |e: &GridEvent<CellState>| log.borrow_mut().push((1, e.clone())))
        };
        {
            let log = log.clone();
            grid.subscribe(move |e: &GridEvent<CellState>| log.borrow_mut().push((2, e.clone())));
        }

        assert_eq!(grid.observer_count(), 2);

        grid.add_edge(0, 1).unwrap();
        grid.set(0, CellState::Visited).unwrap();
        // Unchanged content is not reported
        grid.set(0, CellState::Visited).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                (1, GridEvent::EdgeAdded { a: 0, b: 1 }),
                (2, GridEvent::EdgeAdded { a: 0, b: 1 }),
                (
                    1,
                    GridEvent::CellChanged {
                        cell: 0,
                        old: CellState::Unvisited,
                        new: CellState::Visited
                    }
                ),
                (
                    2,
                    GridEvent::CellChanged {
                        cell: 0,
                        old: CellState::Unvisited,
                        new: CellState::Visited
                    }
                ),
            ]
        );

        assert!(grid.unsubscribe(first));
        assert!(!grid.unsubscribe(first));
        assert_eq!(grid.observer_count(), 1);
        log.borrow_mut().clear();
        grid.remove_edge(0, 1).unwrap();
        assert_eq!(*log.borrow(), vec![(2, GridEvent::EdgeRemoved { a: 0, b: 1 })]);
    }

    #[test]
    fn test_channel_observer() {
        let mut grid = GridGraph::new(2, 1, CellState::Unvisited);
        let (tx, rx) = std::sync::mpsc::channel();
        grid.subscribe_channel(tx);
        grid.fill();
        grid.set(1, CellState::Completed).unwrap();
        let events = rx.try_iter().collect::<Vec<_>>();
        assert_eq!(events[0], GridEvent::GraphChanged);
        assert!(matches!(events[1], GridEvent::CellChanged { cell: 1, .. }));
    }

    #[test]
    fn test_display() {
        let mut grid = GridGraph::new(2, 2, 0u8);
        grid.add_edge(0, 1).unwrap();
        grid.add_edge(1, 3).unwrap();
        grid.add_edge(2, 3).unwrap();
        let expected = "+--+--+\n|     |\n+--+  +\n|     |\n+--+--+\n";
        assert_eq!(grid.to_string(), expected);
    }
}
