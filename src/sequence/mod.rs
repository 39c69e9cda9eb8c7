//! Geometric orders in which the cells of a grid can be visited.
//!
//! Every policy is a small value holding the grid geometry and its
//! parameters; [`CellOrder::iter`] starts a fresh, finite pass over the cells
//! it selects. Wilson's algorithm uses these orders to pick the start cells
//! of its random walks, renderers use them to animate growth.

mod crosses;
mod curves;
mod shapes;
mod spiral;
mod sweep;

pub use crosses::RecursiveCrosses;
pub use curves::{Curve, CurveKind};
pub use shapes::{Circle, ExpandingCircle, ExpandingRectangle, Metric, NestedRectangles};
pub use spiral::Spiral;
pub use sweep::{Sweep, SweepAxis};

use crate::grid::Cell;

/// A restartable, finite sequence of cell ids.
pub trait CellOrder {
    /// Starts a new pass over the sequence.
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_>;
}

impl<C: CellOrder + ?Sized> CellOrder for Box<C> {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        (**self).iter()
    }
}

/// An explicit, precomputed order.
impl CellOrder for Vec<Cell> {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(self.as_slice().iter().copied())
    }
}

/// Runs several orders one after the other.
pub struct Concat(pub Vec<Box<dyn CellOrder>>);

impl Concat {
    pub fn new(parts: Vec<Box<dyn CellOrder>>) -> Self {
        Concat(parts)
    }
}

impl CellOrder for Concat {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(self.0.iter().flat_map(|part| part.iter()))
    }
}

/// Interleaves several orders one element at a time, skipping exhausted ones,
/// until all of them are exhausted. Used to grow several fronts at once.
pub struct Parallel(pub Vec<Box<dyn CellOrder>>);

impl Parallel {
    pub fn new(parts: Vec<Box<dyn CellOrder>>) -> Self {
        Parallel(parts)
    }
}

impl CellOrder for Parallel {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(RoundRobin {
            cursors: self.0.iter().map(|part| part.iter()).collect(),
            next: 0,
        })
    }
}

struct RoundRobin<'a> {
    cursors: Vec<Box<dyn Iterator<Item = Cell> + 'a>>,
    next: usize,
}

impl Iterator for RoundRobin<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while !self.cursors.is_empty() {
            if self.next >= self.cursors.len() {
                self.next = 0;
            }
            match self.cursors[self.next].next() {
                Some(cell) => {
                    self.next += 1;
                    return Some(cell);
                }
                // Dropping the cursor shifts the next one into this slot
                None => {
                    self.cursors.remove(self.next);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_round_robin() {
        let order = Parallel::new(vec![
            Box::new(vec![0usize, 1, 2, 3]),
            Box::new(vec![10usize]),
            Box::new(vec![20usize, 21]),
        ]);
        assert_eq!(order.iter().collect::<Vec<_>>(), vec![0, 10, 20, 1, 21, 2, 3]);
        // Restartable
        assert_eq!(order.iter().count(), 7);
    }

    #[test]
    fn test_parallel_empty() {
        let order = Parallel::new(vec![Box::new(Vec::<Cell>::new()), Box::new(Vec::<Cell>::new())]);
        assert_eq!(order.iter().next(), None);
        assert_eq!(Parallel::new(Vec::new()).iter().next(), None);
    }

    #[test]
    fn test_concat() {
        let order = Concat::new(vec![Box::new(vec![3usize, 4]), Box::new(vec![1usize])]);
        assert_eq!(order.iter().collect::<Vec<_>>(), vec![3, 4, 1]);
    }
}
