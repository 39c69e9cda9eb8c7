use super::CellOrder;
use crate::grid::{Cell, GridSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepAxis {
    /// Row-major: left to right within a row, rows top-down.
    #[default]
    Rows,
    /// Column-major: top-down within a column, columns left to right.
    Columns,
}

/// Visits every cell line by line. Reversing turns a top-down row sweep into
/// a bottom-up one (right to left within each row), and a left-to-right
/// column sweep into a right-to-left one.
#[derive(Debug, Clone, Copy)]
pub struct Sweep {
    size: GridSize,
    axis: SweepAxis,
    reversed: bool,
}

impl Sweep {
    pub fn rows(size: GridSize) -> Self {
        Sweep {
            size,
            axis: SweepAxis::Rows,
            reversed: false,
        }
    }

    pub fn columns(size: GridSize) -> Self {
        Sweep {
            size,
            axis: SweepAxis::Columns,
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    fn nth(&self, i: usize) -> Cell {
        match self.axis {
            SweepAxis::Rows => i,
            SweepAxis::Columns => {
                let (col, row) = (i / self.size.rows, i % self.size.rows);
                row * self.size.cols + col
            }
        }
    }
}

impl CellOrder for Sweep {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        let n = self.size.cells();
        if self.reversed {
            Box::new((0..n).rev().map(move |i| self.nth(i)))
        } else {
            Box::new((0..n).map(move |i| self.nth(i)))
        }
    }
}
