//! Perfect maze generation on rectangular grids.
//!
//! A maze is a [`grid::GridGraph`] whose passages form a spanning tree. The
//! [`generators`] carve it with one of many randomized algorithms, the
//! [`sequence`] module supplies the cell orders some of them follow, and
//! [`solvers`] walks the result.

pub mod error;
pub mod generators;
pub mod grid;
pub mod partition;
pub mod sequence;
pub mod solvers;

pub use error::{MazeError, Result};
pub use generators::{Generator, generate_maze};
pub use grid::{Cell, CellState, GridGraph, Maze};
