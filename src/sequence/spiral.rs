use super::CellOrder;
use crate::grid::{Cell, Dir, GridSize};

/// Square spiral around a centre: east 1, south 1, west 2, north 2, east 3, ...
/// Positions outside the grid are skipped; the spiral ends once every cell
/// has been produced.
#[derive(Debug, Clone, Copy)]
pub struct Spiral {
    size: GridSize,
    center: (usize, usize),
}

impl Spiral {
    pub fn new(size: GridSize, center: (usize, usize)) -> Self {
        Spiral { size, center }
    }

    /// Spiral around the grid centre.
    pub fn centered(size: GridSize) -> Self {
        Self::new(size, size.center())
    }
}

impl CellOrder for Spiral {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(SpiralIter {
            size: self.size,
            pos: (self.center.0 as isize, self.center.1 as isize),
            dir: Dir::East,
            leg: 1,
            walked: 0,
            legs_at_length: 0,
            remaining: self.size.cells(),
            started: false,
        })
    }
}

struct SpiralIter {
    size: GridSize,
    pos: (isize, isize),
    dir: Dir,
    /// Length of the current leg.
    leg: usize,
    walked: usize,
    /// Every length is used for two legs.
    legs_at_length: usize,
    remaining: usize,
    started: bool,
}

impl SpiralIter {
    fn step(&mut self) {
        let (dc, dr) = self.dir.delta();
        self.pos = (self.pos.0 + dc, self.pos.1 + dr);
        self.walked += 1;
        if self.walked == self.leg {
            self.walked = 0;
            self.dir = self.dir.turn_right();
            self.legs_at_length += 1;
            if self.legs_at_length == 2 {
                self.legs_at_length = 0;
                self.leg += 1;
            }
        }
    }
}

impl Iterator for SpiralIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.remaining > 0 {
            if self.started {
                self.step();
            }
            self.started = true;
            if let Some(cell) = self.size.cell_at(self.pos.0, self.pos.1) {
                self.remaining -= 1;
                return Some(cell);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spiral_order() {
        let size = GridSize::new(3, 3);
        let cells = Spiral::centered(size).iter().collect::<Vec<_>>();
        assert_eq!(cells, vec![4, 5, 8, 7, 6, 3, 0, 1, 2]);
    }

    #[test]
    fn test_spiral_covers_grid() {
        for (cols, rows, center) in [(6, 3, (0, 0)), (1, 7, (0, 3)), (5, 5, (4, 0)), (4, 4, (9, 9))] {
            let size = GridSize::new(cols, rows);
            let mut cells = Spiral::new(size, center).iter().collect::<Vec<_>>();
            cells.sort_unstable();
            assert_eq!(cells, (0..size.cells()).collect::<Vec<_>>());
        }
        assert_eq!(Spiral::centered(GridSize::new(0, 0)).iter().count(), 0);
    }
}
