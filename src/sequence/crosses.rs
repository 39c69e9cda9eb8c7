use std::collections::VecDeque;

use super::CellOrder;
use crate::grid::{Cell, GridSize};

/// Draws a cross through the middle of the grid (middle row, then the rest of
/// the middle column), then recurses into the four quadrants the cross leaves
/// behind, level by level. Each cross is produced completely before the next.
#[derive(Debug, Clone, Copy)]
pub struct RecursiveCrosses {
    size: GridSize,
}

impl RecursiveCrosses {
    pub fn new(size: GridSize) -> Self {
        RecursiveCrosses { size }
    }
}

impl CellOrder for RecursiveCrosses {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        let mut pending = VecDeque::new();
        pending.push_back(Area {
            left: 0,
            top: 0,
            width: self.size.cols,
            height: self.size.rows,
        });
        Box::new(CrossesIter {
            size: self.size,
            pending,
            batch: Vec::new().into_iter(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Area {
    left: usize,
    top: usize,
    width: usize,
    height: usize,
}

struct CrossesIter {
    size: GridSize,
    pending: VecDeque<Area>,
    batch: std::vec::IntoIter<Cell>,
}

impl CrossesIter {
    /// Cells of the cross through `area`; queues the four remaining quadrants.
    fn cross(&mut self, area: Area) -> Vec<Cell> {
        let Area {
            left,
            top,
            width,
            height,
        } = area;
        let mid_col = left + width / 2;
        let mid_row = top + height / 2;

        let mut cells = (left..left + width)
            .map(|col| self.size.ravel(col, mid_row))
            .collect::<Vec<_>>();
        cells.extend(
            (top..top + height)
                .filter(|&row| row != mid_row)
                .map(|row| self.size.ravel(mid_col, row)),
        );

        let (left_w, right_w) = (mid_col - left, left + width - mid_col - 1);
        let (upper_h, lower_h) = (mid_row - top, top + height - mid_row - 1);
        let quadrants = [
            (left, top, left_w, upper_h),
            (mid_col + 1, top, right_w, upper_h),
            (left, mid_row + 1, left_w, lower_h),
            (mid_col + 1, mid_row + 1, right_w, lower_h),
        ];
        for (left, top, width, height) in quadrants {
            if width > 0 && height > 0 {
                self.pending.push_back(Area {
                    left,
                    top,
                    width,
                    height,
                });
            }
        }
        cells
    }
}

impl Iterator for CrossesIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        loop {
            if let Some(cell) = self.batch.next() {
                return Some(cell);
            }
            let area = self.pending.pop_front()?;
            if area.width == 0 || area.height == 0 {
                continue;
            }
            self.batch = self.cross(area).into_iter();
        }
    }
}
