use thiserror::Error;

use crate::grid::Cell;

/// Errors raised by the grid, the partition, the generators and the solvers.
///
/// All of them are programming errors on the caller's side: retrying the same
/// call will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("coordinate ({col}, {row}) is outside the {cols}x{rows} grid")]
    CoordOutOfRange {
        col: usize,
        row: usize,
        cols: usize,
        rows: usize,
    },

    #[error("cell {cell} is outside a grid of {cells} cells")]
    CellOutOfRange { cell: Cell, cells: usize },

    #[error("cells {a} and {b} are not grid-adjacent")]
    NotAdjacent { a: Cell, b: Cell },

    #[error("edge {a}-{b} already exists")]
    EdgeExists { a: Cell, b: Cell },

    #[error("edge {a}-{b} does not exist")]
    MissingEdge { a: Cell, b: Cell },

    #[error("cells {a} and {b} are already in the same component")]
    CycleDetected { a: Cell, b: Cell },

    #[error("grid already has {edges} passages, clear it before generating again")]
    AlreadyGenerated { edges: usize },

    #[error("expected {expected} edge priorities, got {actual}")]
    InvalidPriorities { expected: usize, actual: usize },

    #[error("priority {priority} is assigned to more than one edge")]
    DuplicatePriority { priority: u32 },

    #[error("unknown generator `{0}`")]
    UnknownGenerator(String),

    #[error("cell {to} is not reachable from cell {from}")]
    Unreachable { from: Cell, to: Cell },
}

pub type Result<T> = std::result::Result<T, MazeError>;
