use super::CellOrder;
use crate::grid::{Cell, Dir, GridSize};

/// Space-filling curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Covers a `2^n x 2^n` square, open ends at two adjacent corners.
    Hilbert,
    /// Closed variant of the Hilbert curve, `2^n x 2^n` with `n >= 1`.
    Moore,
    /// Covers a `3^n x 3^n` square, open ends at opposite corners.
    Peano,
}

/// L-system of a curve: axiom, rules for the two non-terminal symbols, and
/// how many rewriting steps fewer than the curve order the axiom needs.
struct LSystem {
    axiom: &'static str,
    rules: [(char, &'static str); 2],
    depth_offset: usize,
}

impl CurveKind {
    fn base(self) -> usize {
        match self {
            CurveKind::Hilbert | CurveKind::Moore => 2,
            CurveKind::Peano => 3,
        }
    }

    fn lsystem(self) -> LSystem {
        match self {
            CurveKind::Hilbert => LSystem {
                axiom: "A",
                rules: [('A', "+BF-AFA-FB+"), ('B', "-AF+BFB+FA-")],
                depth_offset: 0,
            },
            CurveKind::Moore => LSystem {
                axiom: "LFL+F+LFL",
                rules: [('L', "-RF+LFL+FR-"), ('R', "+LF-RFR-FL+")],
                depth_offset: 1,
            },
            CurveKind::Peano => LSystem {
                axiom: "X",
                rules: [('X', "XFYFX+F+YFXFY-F-XFYFX"), ('Y', "YFXFY-F-XFYFX+F+YFXFY")],
                depth_offset: 0,
            },
        }
    }
}

/// Visits the grid along a space-filling curve.
///
/// The curve is built for the smallest square of side `2^n` (Hilbert, Moore)
/// or `3^n` (Peano) that encloses the grid, anchored at the top-left cell.
/// Curve points outside the grid are dropped, so grids whose sides are not
/// curve sizes still get every cell exactly once, but consecutive cells are
/// only guaranteed to be adjacent when the grid is exactly the curve square.
#[derive(Debug, Clone, Copy)]
pub struct Curve {
    size: GridSize,
    kind: CurveKind,
}

impl Curve {
    pub fn new(size: GridSize, kind: CurveKind) -> Self {
        Curve { size, kind }
    }

    pub fn hilbert(size: GridSize) -> Self {
        Self::new(size, CurveKind::Hilbert)
    }

    pub fn moore(size: GridSize) -> Self {
        Self::new(size, CurveKind::Moore)
    }

    pub fn peano(size: GridSize) -> Self {
        Self::new(size, CurveKind::Peano)
    }

    /// Curve order `n` and side length of the enclosing square.
    pub fn order(&self) -> (usize, usize) {
        let extent = self.size.cols.max(self.size.rows);
        let min_order = usize::from(self.kind == CurveKind::Moore);
        let mut order = 0;
        let mut side = 1;
        while side < extent || order < min_order {
            order += 1;
            side *= self.kind.base();
        }
        (order, side)
    }

    fn cells(&self) -> Vec<Cell> {
        if self.size.is_empty() {
            return Vec::new();
        }
        let (order, side) = self.order();
        let system = self.kind.lsystem();
        let mut turtle = Turtle::new(side * side);
        let depth = order - system.depth_offset;
        for symbol in system.axiom.chars() {
            turtle.expand(&system, symbol, depth);
        }

        // The turtle starts at the origin heading east; shift its trace so
        // that the enclosing square starts at (0, 0)
        let min_x = turtle.trace.iter().map(|p| p.0).min().unwrap_or(0);
        let min_y = turtle.trace.iter().map(|p| p.1).min().unwrap_or(0);
        turtle
            .trace
            .iter()
            .filter_map(|&(x, y)| self.size.cell_at(x - min_x, y - min_y))
            .collect()
    }
}

impl CellOrder for Curve {
    fn iter(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(self.cells().into_iter())
    }
}

struct Turtle {
    pos: (isize, isize),
    heading: Dir,
    trace: Vec<(isize, isize)>,
}

impl Turtle {
    fn new(capacity: usize) -> Self {
        let mut trace = Vec::with_capacity(capacity);
        trace.push((0, 0));
        Turtle {
            pos: (0, 0),
            heading: Dir::East,
            trace,
        }
    }

    fn expand(&mut self, system: &LSystem, symbol: char, depth: usize) {
        match symbol {
            'F' => {
                let (dx, dy) = self.heading.delta();
                self.pos = (self.pos.0 + dx, self.pos.1 + dy);
                self.trace.push(self.pos);
            }
            '+' => self.heading = self.heading.turn_left(),
            '-' => self.heading = self.heading.turn_right(),
            _ if depth > 0 => {
                if let Some((_, rule)) = system.rules.iter().find(|(s, _)| *s == symbol) {
                    for next in rule.chars() {
                        self.expand(system, next, depth - 1);
                    }
                }
            }
            _ => {}
        }
    }
}
