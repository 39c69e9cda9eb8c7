use crate::error::{MazeError, Result};

use super::{Cell, Edge};

/// The four grid directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    /// Clockwise, starting at north.
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    pub fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::East => Dir::West,
            Dir::South => Dir::North,
            Dir::West => Dir::East,
        }
    }

    pub fn turn_left(self) -> Dir {
        match self {
            Dir::North => Dir::West,
            Dir::East => Dir::North,
            Dir::South => Dir::East,
            Dir::West => Dir::South,
        }
    }

    pub fn turn_right(self) -> Dir {
        self.turn_left().opposite()
    }

    /// Column and row offsets of a single step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::North => (0, -1),
            Dir::East => (1, 0),
            Dir::South => (0, 1),
            Dir::West => (-1, 0),
        }
    }

    /// Bit used for this direction in per-cell edge masks.
    pub(crate) fn bit(self) -> u8 {
        match self {
            Dir::North => 0b0001,
            Dir::East => 0b0010,
            Dir::South => 0b0100,
            Dir::West => 0b1000,
        }
    }
}

/// Geometry of a `cols x rows` grid: the bijection between cell ids and
/// `(column, row)` pairs plus 4-neighbour adjacency.
///
/// It is `Copy` so cell orders and generators can hold it while the grid
/// itself is borrowed mutably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

impl GridSize {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Number of cells.
    pub fn cells(&self) -> usize {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cells() == 0
    }

    /// Number of edges of the full 4-neighbour grid graph.
    pub fn max_edges(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.cols - 1) * self.rows + self.cols * (self.rows - 1)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell < self.cells()
    }

    pub fn contains_coord(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    pub fn check(&self, cell: Cell) -> Result<Cell> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(MazeError::CellOutOfRange {
                cell,
                cells: self.cells(),
            })
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Result<Cell> {
        if self.contains_coord(col, row) {
            Ok(self.ravel(col, row))
        } else {
            Err(MazeError::CoordOutOfRange {
                col,
                row,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    pub fn col(&self, cell: Cell) -> Result<usize> {
        self.check(cell).map(|cell| cell % self.cols)
    }

    pub fn row(&self, cell: Cell) -> Result<usize> {
        self.check(cell).map(|cell| cell / self.cols)
    }

    /// Column and row of a cell known to be in range.
    pub(crate) fn coord(&self, cell: Cell) -> (usize, usize) {
        (cell % self.cols, cell / self.cols)
    }

    pub(crate) fn ravel(&self, col: usize, row: usize) -> Cell {
        row * self.cols + col
    }

    /// Cell id for signed coordinates, `None` when they fall outside the grid.
    pub(crate) fn cell_at(&self, col: isize, row: isize) -> Option<Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        self.contains_coord(col, row).then(|| self.ravel(col, row))
    }

    /// The neighbour of `cell` in direction `dir`, if it exists.
    pub fn neighbor(&self, cell: Cell, dir: Dir) -> Option<Cell> {
        if !self.contains(cell) {
            return None;
        }
        let (col, row) = self.coord(cell);
        let (dc, dr) = dir.delta();
        self.cell_at(col as isize + dc, row as isize + dr)
    }

    /// Grid-adjacent cells of `cell`, in N, E, S, W order. Boundary cells have
    /// fewer than four.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + use<> {
        let size = *self;
        Dir::ALL
            .into_iter()
            .filter_map(move |dir| size.neighbor(cell, dir))
    }

    /// Direction leading from `a` to `b` when they are grid-adjacent.
    pub fn direction(&self, a: Cell, b: Cell) -> Option<Dir> {
        Dir::ALL
            .into_iter()
            .find(|&dir| self.neighbor(a, dir) == Some(b))
    }

    /// Every edge of the full grid graph in canonical order: cells in
    /// row-major order, each contributing its east edge then its south edge.
    pub fn all_edges(&self) -> impl Iterator<Item = Edge> + use<> {
        let size = *self;
        (0..size.cells()).flat_map(move |cell| {
            [Dir::East, Dir::South]
                .into_iter()
                .filter_map(move |dir| size.neighbor(cell, dir))
                .map(move |other| Edge::new(cell, other))
        })
    }

    /// Slot of an edge in a `2 * cells` table indexed by its lower cell and
    /// whether it leads east or south.
    pub(crate) fn edge_slot(&self, edge: Edge) -> usize {
        // With a single column, `a + 1` is the cell below
        if edge.b == edge.a + 1 && edge.b % self.cols != 0 {
            edge.a * 2
        } else {
            edge.a * 2 + 1
        }
    }

    /// Centre cell coordinate.
    pub fn center(&self) -> (usize, usize) {
        (self.cols / 2, self.rows / 2)
    }
}
